mod checkout_flow;
mod config_tariffs;
mod history_file;
