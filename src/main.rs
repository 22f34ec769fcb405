// SPDX-License-Identifier: MIT

//! Waylog console frontend.
//!
//! Drives the interaction controller from a line-based prompt: `click`
//! plays a map click, `log` submits the form, `goto` re-centers the map on
//! a logged workout. Workouts persist in a JSON file between runs.

use anyhow::Context;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use waylog::{
    config::Config,
    error::{AppError, Result},
    models::{Coords, WorkoutKind},
    services::InteractionController,
    store::FileStore,
    surfaces::{FormInput, FormSurface, ListEntry, ListSurface, MapSurface, PositionSource},
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_logging();

    let config = Config::from_env().context("Failed to load configuration")?;
    tracing::info!(data_file = %config.data_file.display(), "Starting waylog");

    let store = FileStore::new(&config.data_file);
    let mut controller = InteractionController::new(
        Box::new(ConsoleMap),
        Box::new(ConsoleForm),
        Box::new(ConsoleList),
        Box::new(store),
        config.zoom,
    );

    // The one suspend point: acquire the position once, then run the
    // event loop. Map features stay disabled if this fails.
    let source = FixedPosition {
        position: config.home_position,
    };
    match source.current_position().await {
        Ok(coords) => controller.position_acquired(coords),
        Err(err) => controller.position_unavailable(&err.to_string()),
    }

    println!("waylog — type 'help' for commands");
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        if !dispatch(&mut controller, line.trim()) {
            break;
        }
    }
    Ok(())
}

/// Handle one command line. Returns false when the user quits.
fn dispatch(controller: &mut InteractionController, line: &str) -> bool {
    let mut parts = line.split_whitespace();
    match parts.next() {
        None => {}
        Some("help") => print_help(),
        Some("click") => {
            let lat = parts.next().and_then(|s| s.parse::<f64>().ok());
            let lng = parts.next().and_then(|s| s.parse::<f64>().ok());
            match (lat, lng) {
                (Some(lat), Some(lng)) => controller.map_click(Coords::new(lat, lng)),
                _ => println!("usage: click <lat> <lng>"),
            }
        }
        Some("type") => match parts.next().unwrap_or_default().parse::<WorkoutKind>() {
            Ok(kind) => controller.kind_toggled(kind),
            Err(err) => println!("{err}"),
        },
        Some("log") => {
            // Field parsing and validation belong to the controller; raw
            // strings go straight through, missing arguments included.
            let kind = parts.next().unwrap_or_default().to_string();
            let distance = parts.next().unwrap_or_default().to_string();
            let duration = parts.next().unwrap_or_default().to_string();
            let variant = parts.next().unwrap_or_default().to_string();

            let is_cycling = kind == "cycling";
            let input = if is_cycling {
                FormInput {
                    kind,
                    distance,
                    duration,
                    elevation_gain: variant,
                    ..FormInput::default()
                }
            } else {
                FormInput {
                    kind,
                    distance,
                    duration,
                    cadence: variant,
                    ..FormInput::default()
                }
            };
            controller.submit(&input);
        }
        Some("goto") => match parts.next() {
            Some(id) => controller.list_entry_clicked(id),
            None => println!("usage: goto <id>"),
        },
        Some("quit") | Some("exit") => return false,
        Some(other) => println!("unknown command '{other}' (try 'help')"),
    }
    true
}

fn print_help() {
    println!("commands:");
    println!("  click <lat> <lng>                         pick a spot on the map");
    println!("  type <running|cycling>                    toggle the variant fields");
    println!("  log <running|cycling> <km> <min> <extra>  submit the form");
    println!("                                            extra = cadence (spm) or elevation gain (m)");
    println!("  goto <id>                                 re-center the map on a workout");
    println!("  quit");
}

// ─── Console surfaces ────────────────────────────────────────

fn icon(kind: WorkoutKind) -> &'static str {
    match kind {
        WorkoutKind::Running => "🏃",
        WorkoutKind::Cycling => "🚴",
    }
}

struct ConsoleMap;

impl MapSurface for ConsoleMap {
    fn set_view(&mut self, coords: Coords, zoom: u8) {
        println!(
            "[map] centered on ({:.4}, {:.4}) at zoom {zoom}",
            coords.lat, coords.lng
        );
    }

    fn add_marker(&mut self, coords: Coords, kind: WorkoutKind, popup: &str) {
        println!(
            "[map] {} marker at ({:.4}, {:.4}): {popup}",
            icon(kind),
            coords.lat,
            coords.lng
        );
    }
}

struct ConsoleForm;

impl FormSurface for ConsoleForm {
    fn show(&mut self) {
        println!("[form] open — log <running|cycling> <km> <min> <extra>");
    }

    fn focus_distance(&mut self) {}

    fn hide_and_clear(&mut self) {
        println!("[form] cleared");
    }

    fn toggle_variant_fields(&mut self, kind: WorkoutKind) {
        let field = match kind {
            WorkoutKind::Running => "cadence (spm)",
            WorkoutKind::Cycling => "elevation gain (m)",
        };
        println!("[form] extra field: {field}");
    }

    fn report_invalid(&mut self, message: &str) {
        println!("[form] ✗ {message}");
    }

    fn report_unavailable(&mut self, message: &str) {
        println!("✗ {message}");
    }
}

struct ConsoleList;

impl ListSurface for ConsoleList {
    fn render_entry(&mut self, entry: &ListEntry) {
        println!(
            "  {} {} (#{}) — {} km, {} min, {} {}, {} {}",
            icon(entry.kind),
            entry.title,
            entry.id,
            entry.distance_km,
            entry.duration_min,
            entry.metric,
            entry.metric_unit,
            entry.extra,
            entry.extra_unit
        );
    }
}

/// Position source backed by the configured home coordinates.
struct FixedPosition {
    position: Option<(f64, f64)>,
}

#[async_trait::async_trait]
impl PositionSource for FixedPosition {
    async fn current_position(&self) -> Result<Coords> {
        match self.position {
            Some((lat, lng)) => Ok(Coords::new(lat, lng)),
            None => Err(AppError::GeolocationUnavailable(
                "WAYLOG_HOME_LAT/WAYLOG_HOME_LNG not set".to_string(),
            )),
        }
    }
}

/// Initialize structured logging.
fn init_logging() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("waylog=debug".parse().expect("valid directive"))
                .add_directive("info".parse().expect("valid directive")),
        )
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();
}
