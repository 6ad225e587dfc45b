//! The interactive operator session.
//!
//! Reads commands line by line, drives the [`ParkingRegistry`], and writes
//! rendered results. Domain errors are reported to the operator and the
//! session continues; only I/O on the terminal itself ends it early.

use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use tracing::{debug, warn};

use parkir_config::ParkirConfig;
use parkir_core::{ParkingError, ParkingRegistry};
use parkir_types::{ExitTime, NaiveDateTime, Tariff, VehicleClass};

use crate::commands::{Command, PaymentChoice};
use crate::render;

pub struct Session<C> {
    registry: ParkingRegistry,
    site_name: String,
    /// Config file that tariff changes are written back to.
    config_path: Option<PathBuf>,
    clock: C,
}

impl<C> Session<C>
where
    C: Fn() -> NaiveDateTime,
{
    pub fn new(
        registry: ParkingRegistry,
        site_name: impl Into<String>,
        config_path: Option<PathBuf>,
        clock: C,
    ) -> Self {
        Self {
            registry,
            site_name: site_name.into(),
            config_path,
            clock,
        }
    }

    #[cfg(test)]
    pub fn registry(&self) -> &ParkingRegistry {
        &self.registry
    }

    /// Run until `quit` or end of input.
    pub fn run(&mut self, input: &mut impl BufRead, out: &mut impl Write) -> io::Result<()> {
        writeln!(out, "{}", render::banner(&self.site_name))?;
        loop {
            write!(out, "> ")?;
            out.flush()?;
            let Some(line) = read_line(input)? else {
                break;
            };
            match Command::parse(&line) {
                Ok(None) => {}
                Ok(Some(Command::Quit)) => break,
                Ok(Some(command)) => self.execute(command, input, out)?,
                Err(err) => writeln!(out, "Error: {err}")?,
            }
        }
        writeln!(out, "Terima kasih.")
    }

    fn execute(
        &mut self,
        command: Command,
        input: &mut impl BufRead,
        out: &mut impl Write,
    ) -> io::Result<()> {
        match command {
            Command::CheckIn {
                plate,
                vehicle_class,
            } => self.check_in(&plate, vehicle_class, out),
            Command::CheckOut {
                plate,
                lost_ticket,
                exit_time,
            } => self.check_out(&plate, lost_ticket, exit_time, input, out),
            Command::ListParked => {
                writeln!(out, "{}", render::parked_table(&self.registry.list_parked()))
            }
            Command::ListHistory => {
                writeln!(out, "{}", render::history_table(self.registry.list_history()))
            }
            Command::ShowTariffs => writeln!(out, "{}", render::tariffs(self.registry.tariffs())),
            Command::SetTariff {
                vehicle_class,
                tariff,
            } => self.set_tariff(vehicle_class, tariff, out),
            Command::Help => writeln!(out, "{}", render::HELP),
            Command::Quit => Ok(()),
        }
    }

    fn check_in(
        &mut self,
        plate: &str,
        vehicle_class: VehicleClass,
        out: &mut impl Write,
    ) -> io::Result<()> {
        let now = (self.clock)();
        match self.registry.check_in(plate, vehicle_class, now) {
            Ok(vehicle) => {
                writeln!(out, "{}", render::ticket(&self.site_name, vehicle))?;
                writeln!(out, "{}", render::check_in_status(vehicle))
            }
            Err(err) => report(out, &err),
        }
    }

    fn check_out(
        &mut self,
        plate: &str,
        lost_ticket: bool,
        exit_time: ExitTime,
        input: &mut impl BufRead,
        out: &mut impl Write,
    ) -> io::Result<()> {
        let now = (self.clock)();
        let quote = match self
            .registry
            .quote_checkout_at(plate, exit_time, now, lost_ticket)
        {
            Ok(quote) => quote,
            Err(err) => return report(out, &err),
        };
        writeln!(out, "{}", render::breakdown(&quote))?;

        let payment_method = loop {
            write!(out, "{}", render::PAYMENT_PROMPT)?;
            out.flush()?;
            let Some(answer) = read_line(input)? else {
                break None;
            };
            match PaymentChoice::parse(&answer) {
                Some(PaymentChoice::Pay(method)) => break Some(method),
                Some(PaymentChoice::Cancel) => break None,
                None => writeln!(out, "Pilihan tidak dikenal: {:?}", answer.trim())?,
            }
        };

        let Some(payment_method) = payment_method else {
            debug!(plate = %quote.plate, "Checkout cancelled");
            return writeln!(out, "Checkout {} dibatalkan.", quote.plate);
        };

        match self.registry.settle(&quote, payment_method) {
            Ok(record) => writeln!(out, "{}", render::checkout_status(record)),
            Err(err) => report(out, &err),
        }
    }

    fn set_tariff(
        &mut self,
        vehicle_class: VehicleClass,
        tariff: Tariff,
        out: &mut impl Write,
    ) -> io::Result<()> {
        self.registry.set_tariff(vehicle_class, tariff);
        if let Some(path) = &self.config_path
            && let Err(e) = ParkirConfig::persist_tariff(path, vehicle_class, tariff)
        {
            warn!(path = %path.display(), "Failed to persist tariff: {e}");
            writeln!(out, "Tarif diterapkan, tetapi gagal disimpan: {e}")?;
        }
        writeln!(out, "{}", render::tariffs(self.registry.tariffs()))
    }
}

fn report(out: &mut impl Write, err: &ParkingError) -> io::Result<()> {
    debug!("Operation rejected: {err}");
    writeln!(out, "Error: {err}")
}

/// Next line without its terminator, or `None` at end of input.
fn read_line(input: &mut impl BufRead) -> io::Result<Option<String>> {
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    let trimmed = line.trim_end_matches(['\r', '\n']).len();
    line.truncate(trimmed);
    Ok(Some(line))
}
