#![forbid(unsafe_code)]
use anyhow::{Context, Result};
use jadwal_booking::booker::BookingLedger;
use jadwal_booking::catalog::ScheduleCatalog;
use jadwal_booking::menu;
use jadwal_booking::rooms::RoomRegistry;
use std::env;
use std::io;
use std::path::Path;
use tracing::info;
use tracing_subscriber::filter::EnvFilter;

const DEFAULT_SCHEDULE_FILE: &str = "Mapping Jadwal Mengajar Prodi Teknik Informatika.xlsx";
const DEFAULT_EXPORT_FILE: &str = "jadwal_terisi.xlsx";

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_target(false)
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    dotenvy::dotenv().ok();

    let schedule_file =
        env::var("SCHEDULE_FILE").unwrap_or_else(|_| DEFAULT_SCHEDULE_FILE.to_string());
    let export_file = env::var("EXPORT_FILE").unwrap_or_else(|_| DEFAULT_EXPORT_FILE.to_string());

    // A missing or corrupt timetable is fatal: there is nothing to book.
    let catalog = ScheduleCatalog::load(Path::new(&schedule_file))
        .with_context(|| format!("loading timetable '{schedule_file}'"))?;

    let registry = match env::var("ROOMS_FILE") {
        Ok(path) => RoomRegistry::from_config(Path::new(&path))?,
        Err(_) => RoomRegistry::default_campus(),
    };
    info!("Room registry holds {} rooms", registry.len());

    let mut ledger = BookingLedger::new();

    let stdin = io::stdin();
    let stdout = io::stdout();
    menu::run(
        &mut stdin.lock(),
        &mut stdout.lock(),
        &catalog,
        &registry,
        &mut ledger,
        Path::new(&export_file),
    )?;

    Ok(())
}
