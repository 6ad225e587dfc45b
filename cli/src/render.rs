//! Text shown to the operator.
//!
//! Every function returns a `String` so the session can write it wherever it
//! likes and tests can compare it directly.

use std::fmt::Write as _;

use parkir_core::{CheckoutQuote, DurationBreakdown};
use parkir_types::{ParkedVehicle, TariffTable, TransactionRecord, VehicleClass};

const TICKET_TIME: &str = "%d %b %Y, %H:%M:%S";
const BREAKDOWN_TIME: &str = "%d-%b %H:%M";
const PARKED_TIME: &str = "%d-%b %H:%M:%S";
const STATUS_TIME: &str = "%H:%M:%S";
const RULE: &str = "-------------------------";

pub const HELP: &str = "\
Perintah:
  masuk <wilayah> <nomor> <seri> <mobil|motor>   check-in kendaraan
  keluar <wilayah> <nomor> <seri> [hilang] [at <thn> <bln> <tgl> <jam> <mnt> <dtk>]
                                                 hitung biaya dan checkout
  aktif                                          daftar kendaraan terparkir
  riwayat                                        riwayat transaksi
  tarif [<mobil|motor> <jam-pertama> <jam-berikutnya>]
                                                 lihat atau ubah tarif
  help                                           tampilkan bantuan ini
  selesai                                        keluar dari aplikasi";

pub const PAYMENT_PROMPT: &str = "Metode bayar (cash / emoney / batal): ";

#[must_use]
pub fn banner(site_name: &str) -> String {
    format!("=== Sistem Parkir {site_name} ===\nKetik help untuk daftar perintah.")
}

/// Virtual ticket printed at check-in.
#[must_use]
pub fn ticket(site_name: &str, vehicle: &ParkedVehicle) -> String {
    format!(
        "--- TIKET PARKIR VIRTUAL: {site_name} ---\n\
         Nomor Polisi    : {}\n\
         Jenis Kendaraan : {}\n\
         Waktu Masuk     : {}\n\
         --- Harap simpan bukti ini ---",
        vehicle.plate(),
        vehicle.vehicle_class(),
        vehicle.entry_time().format(TICKET_TIME),
    )
}

#[must_use]
pub fn check_in_status(vehicle: &ParkedVehicle) -> String {
    format!(
        "Check-in sukses: {} ({})",
        vehicle.plate(),
        vehicle.entry_time().format(STATUS_TIME)
    )
}

fn duration(breakdown: DurationBreakdown) -> String {
    format!(
        "{} hari, {} jam, {} menit",
        breakdown.days, breakdown.hours, breakdown.minutes
    )
}

/// Payment breakdown shown before the operator confirms a checkout.
#[must_use]
pub fn breakdown(quote: &CheckoutQuote) -> String {
    let Some(hours) = quote.charged_hours else {
        return format!(
            "-- Rincian Denda --\n\
             Nopol       : {}\n\
             Status      : {}\n\
             TOTAL DENDA : {}",
            quote.plate, quote.status, quote.amount_due
        );
    };

    format!(
        "-- Rincian Pembayaran --\n\
         Nopol         : {}\n\
         Waktu Masuk   : {}\n\
         Waktu Keluar  : {}\n\
         Durasi        : {}\n\
         (Dihitung {hours} jam)\n\
         {RULE}\n\
         TOTAL BIAYA   : {}\n\
         {RULE}",
        quote.plate,
        quote.entry_time.format(BREAKDOWN_TIME),
        quote.exit_time.format(BREAKDOWN_TIME),
        duration(quote.duration),
        quote.amount_due,
    )
}

#[must_use]
pub fn checkout_status(record: &TransactionRecord) -> String {
    format!(
        "Checkout {} selesai. Status: {}. Bayar: {} ({})",
        record.plate, record.status, record.amount_due, record.payment_method
    )
}

#[must_use]
pub fn parked_table(vehicles: &[&ParkedVehicle]) -> String {
    if vehicles.is_empty() {
        return "-- Tidak ada kendaraan aktif --".to_string();
    }

    let mut out = format!("{:<14} {:<6} {}", "No. Pol", "Jenis", "Waktu Masuk");
    for vehicle in vehicles {
        let _ = write!(
            out,
            "\n{:<14} {:<6} {}",
            vehicle.plate().as_str(),
            vehicle.vehicle_class().label(),
            vehicle.entry_time().format(PARKED_TIME)
        );
    }
    out
}

#[must_use]
pub fn history_table(records: &[TransactionRecord]) -> String {
    if records.is_empty() {
        return "-- Riwayat masih kosong --".to_string();
    }

    let mut out = format!(
        "{:>4} {:<14} {:<6} {:<13} {:>12} {:<18} {}",
        "ID", "No. Pol", "Jenis", "Waktu Keluar", "Total Biaya", "Status", "Metode"
    );
    for record in records {
        let _ = write!(
            out,
            "\n{:>4} {:<14} {:<6} {:<13} {:>12} {:<18} {}",
            record.id.value(),
            record.plate.as_str(),
            record.vehicle_class.label(),
            record.exit_time.format(BREAKDOWN_TIME).to_string(),
            record.amount_due.to_string(),
            record.status.label(),
            record.payment_method.label()
        );
    }
    out
}

#[must_use]
pub fn tariffs(table: &TariffTable) -> String {
    let mut out = String::from("Tarif parkir:");
    for class in VehicleClass::ALL {
        let tariff = table.for_class(class);
        let _ = write!(
            out,
            "\n  {:<6} jam pertama {}, per jam berikutnya {}",
            class.label(),
            tariff.first_hour,
            tariff.additional_hour
        );
    }
    let _ = write!(out, "\n  Denda tiket hilang {}", table.lost_ticket_penalty);
    out
}
