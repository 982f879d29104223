//! Hotel Desk console
//!
//! Command-line front end for the front-desk screens. Every command goes
//! through the same route guard as the screen it stands for.

use std::path::Path;

use anyhow::{bail, Context};
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use hotel_desk::{
    config::{AppConfig, LoggingConfig},
    format::{format_currency, format_optional_currency, format_optional_datetime},
    guard::GuardDecision,
    models::{Credentials, CustomerPayload, PaymentStatus, Record, RevenueGrouping},
    navigation::Route,
    screens::{CrudScreen, DashboardScreen, InvoicesScreen, Notification, Severity, StatisticsScreen},
    AppState,
};

#[derive(Parser)]
#[command(name = "hotel-desk", version, about = "Front-desk console for the hotel backend")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Sign in and store the session locally
    Login {
        #[arg(short, long)]
        username: String,
        #[arg(short, long, env = "HOTEL_DESK_PASSWORD", hide_env_values = true)]
        password: String,
    },
    Logout,
    /// Show the signed-in user
    Whoami,
    /// Room board grouped by floor
    Board,
    Rooms {
        #[arg(long)]
        search: Option<String>,
    },
    RoomTypes,
    Customers {
        #[arg(long)]
        search: Option<String>,
    },
    Bookings,
    Services,
    Invoices {
        /// "paid" or "unpaid"
        #[arg(long)]
        status: Option<String>,
    },
    /// Check a guest into a vacant room
    CheckIn {
        room: i64,
        /// Existing customer id
        #[arg(long)]
        customer: Option<i64>,
        /// Look the guest up by ID card number
        #[arg(long)]
        id_number: Option<String>,
        /// Create the guest with this name when the lookup finds nothing
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        phone: Option<String>,
        #[arg(long)]
        expected_check_out: Option<String>,
        #[arg(long)]
        note: Option<String>,
    },
    /// Show the charges for an occupied room, and check out with --confirm
    CheckOut {
        room: i64,
        #[arg(long)]
        confirm: bool,
    },
    /// Bill a catalog service to the booking occupying a room
    AddService {
        room: i64,
        #[arg(long)]
        service: i64,
        #[arg(long, default_value_t = 1)]
        quantity: i64,
        #[arg(long)]
        note: Option<String>,
    },
    RemoveService {
        room: i64,
        usage: i64,
    },
    /// Mark a room that finished cleaning as vacant
    CleanRoom {
        room: i64,
    },
    /// Revenue report; defaults to the current month by day
    Stats {
        #[arg(long)]
        from: Option<NaiveDate>,
        #[arg(long)]
        to: Option<NaiveDate>,
        #[arg(long)]
        group: Option<RevenueGrouping>,
    },
    Settings {
        #[command(subcommand)]
        action: SettingsAction,
    },
}

#[derive(Subcommand)]
enum SettingsAction {
    Show,
    /// Set one setting by its stored key, e.g. `darkMode true`
    Set { key: String, value: String },
    Reset,
}

impl Command {
    fn route(&self) -> Option<Route> {
        match self {
            Command::Login { .. } => Some(Route::Login),
            Command::Logout => None,
            Command::Whoami => Some(Route::Profile),
            Command::Board
            | Command::CheckIn { .. }
            | Command::CheckOut { .. }
            | Command::AddService { .. }
            | Command::RemoveService { .. }
            | Command::CleanRoom { .. } => Some(Route::Dashboard),
            Command::Rooms { .. } => Some(Route::Rooms),
            Command::RoomTypes => Some(Route::RoomTypes),
            Command::Customers { .. } => Some(Route::Customers),
            Command::Bookings => Some(Route::Bookings),
            Command::Services => Some(Route::Services),
            Command::Invoices { .. } => Some(Route::Invoices),
            Command::Stats { .. } => Some(Route::Statistics),
            Command::Settings { .. } => Some(Route::Settings),
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let config = AppConfig::load().context("Failed to load configuration")?;
    let _log_guard = init_tracing(&config.logging, &config.storage.dir);

    tracing::debug!(
        "Hotel Desk v{} against {}",
        env!("CARGO_PKG_VERSION"),
        config.api.base_url
    );

    let state = AppState::open(config).context("Failed to open local storage")?;

    if let Some(route) = cli.command.route() {
        enter(&state, route).await?;
    }

    run(&state, cli.command).await
}

/// Stderr logging, plus a daily-rolling file when configured
fn init_tracing(config: &LoggingConfig, dir: &Path) -> Option<WorkerGuard> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| format!("hotel_desk={}", config.level).into());

    let (file_layer, guard) = match &config.file {
        Some(name) => {
            let appender = tracing_appender::rolling::daily(dir, name);
            let (writer, guard) = tracing_appender::non_blocking(appender);
            (
                Some(fmt::layer().with_ansi(false).with_writer(writer)),
                Some(guard),
            )
        }
        None => (None, None),
    };

    let registry = tracing_subscriber::registry().with(filter).with(file_layer);
    if config.format == "json" {
        registry
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        registry.with(fmt::layer().with_writer(std::io::stderr)).init();
    }
    guard
}

/// Restore the session and pass the route guard
async fn enter(state: &AppState, route: Route) -> anyhow::Result<()> {
    let auth = state.services.auth.init().await;
    match state.navigator.enter(route, &auth) {
        GuardDecision::Render => Ok(()),
        GuardDecision::RedirectToLogin => bail!("Not signed in, run `hotel-desk login` first"),
        GuardDecision::AccessDenied => bail!("Your role has no access to {}", route),
        GuardDecision::Loading => bail!("Session is still loading"),
    }
}

fn print_notification(notification: Option<&Notification>) {
    if let Some(n) = notification {
        match n.severity {
            Severity::Error => eprintln!("✗ {}", n.message),
            Severity::Info => println!("ℹ {}", n.message),
            Severity::Success => println!("✓ {}", n.message),
        }
    }
}

async fn run(state: &AppState, command: Command) -> anyhow::Result<()> {
    let repo = &state.repository;

    match command {
        Command::Login { username, password } => {
            let user = state
                .services
                .auth
                .login(&Credentials::new(username, password))
                .await;
            match user {
                Ok(user) => println!("Signed in as {} ({})", user.display_name(), user.role()),
                Err(e) => {
                    let message = state.services.auth.state().error.unwrap_or_else(|| e.user_message());
                    bail!(message);
                }
            }
        }

        Command::Logout => {
            state.services.auth.logout()?;
            println!("Signed out");
        }

        Command::Whoami => match state.services.auth.current_user() {
            Some(user) => {
                println!("{} ({})", user.display_name(), user.username);
                println!("role:  {}", user.role());
                if let Some(email) = &user.email {
                    println!("email: {}", email);
                }
            }
            None => bail!("Not signed in"),
        },

        Command::Board => {
            let mut board = DashboardScreen::new(repo.clone());
            if board.load().await.is_err() {
                print_notification(board.notification());
                bail!("Could not load the dashboard");
            }
            let occupancy = board.occupancy();
            println!(
                "{} rooms: {} vacant, {} occupied, {} cleaning",
                occupancy.total(),
                occupancy.vacant,
                occupancy.occupied,
                occupancy.cleaning
            );
            for (floor, rooms) in board.rooms_by_floor() {
                println!("\nFloor {}", floor);
                for room in rooms {
                    let room_type = board
                        .room_type_of(room)
                        .map(|t| t.ten_loai_phong.as_str())
                        .unwrap_or("-");
                    let guest = board
                        .occupant(room.id)
                        .map(|c| c.ho_ten.as_str())
                        .unwrap_or("");
                    println!(
                        "  [{}] {:<6} {:<14} {:<12} {}",
                        room.id,
                        room.number(),
                        room.trang_thai.as_str(),
                        room_type,
                        guest
                    );
                }
            }
        }

        Command::Rooms { search } => {
            let mut screen = CrudScreen::new(repo.rooms.clone());
            load_list(&mut screen, search).await?;
            for room in screen.visible() {
                println!(
                    "[{}] {:<6} floor {:<3} {}",
                    room.id,
                    room.number(),
                    room.so_tang.map(|f| f.to_string()).unwrap_or_default(),
                    room.trang_thai.as_str()
                );
            }
        }

        Command::RoomTypes => {
            let mut screen = CrudScreen::new(repo.room_types.clone());
            load_list(&mut screen, None).await?;
            for room_type in screen.visible() {
                println!(
                    "[{}] {:<16} night {:>14}  first hour {:>12}  per hour {:>12}  day {:>14}",
                    room_type.id,
                    room_type.ten_loai_phong,
                    format_optional_currency(room_type.gia_qua_dem),
                    format_optional_currency(room_type.gia_gio_dau),
                    format_optional_currency(room_type.gia_theo_gio),
                    format_optional_currency(room_type.gia_qua_ngay)
                );
            }
        }

        Command::Customers { search } => {
            let mut screen = CrudScreen::new(repo.customers.clone());
            load_list(&mut screen, search).await?;
            for customer in screen.visible() {
                println!(
                    "[{}] {:<24} {:<13} {}",
                    customer.id,
                    customer.ho_ten,
                    customer.cmnd.as_deref().unwrap_or("-"),
                    customer.so_dien_thoai.as_deref().unwrap_or("")
                );
            }
        }

        Command::Bookings => {
            let mut screen = CrudScreen::new(repo.bookings.clone());
            load_list(&mut screen, None).await?;
            for booking in screen.visible() {
                println!(
                    "[{}] room {:<4} customer {:<4} {} → {}  {}",
                    booking.id,
                    booking.phong_id.unwrap_or_default(),
                    booking.khach_hang_id.unwrap_or_default(),
                    format_optional_datetime(booking.thoi_gian_vao.as_deref()),
                    format_optional_datetime(booking.thoi_gian_ra.as_deref()),
                    booking.trang_thai.as_str()
                );
            }
        }

        Command::Services => {
            let mut screen = CrudScreen::new(repo.services.clone());
            load_list(&mut screen, None).await?;
            for service in screen.visible() {
                println!(
                    "[{}] {:<24} {}",
                    service.id,
                    service.ten_dich_vu,
                    format_optional_currency(service.gia)
                );
            }
        }

        Command::Invoices { status } => {
            let mut screen = InvoicesScreen::new(repo.invoices.clone());
            screen.status_filter = status.as_deref().map(PaymentStatus::from);
            if screen.load().await.is_err() {
                print_notification(screen.notification());
                bail!("Could not load invoices");
            }
            for invoice in screen.visible() {
                println!(
                    "[{}] booking {:<4} {:>14}  {:<16} {}",
                    invoice.id,
                    invoice.dat_phong_id.unwrap_or_default(),
                    format_currency(invoice.tong_tien),
                    invoice
                        .trang_thai_thanh_toan
                        .as_ref()
                        .map(|s| s.as_str())
                        .unwrap_or("-"),
                    format_optional_datetime(invoice.thoi_gian_tra.as_deref())
                );
            }
            let totals = screen.totals();
            println!(
                "\n{} invoices, total {} (paid {}, unpaid {})",
                totals.count,
                format_currency(totals.total),
                format_currency(totals.paid),
                format_currency(totals.unpaid)
            );
        }

        Command::CheckIn {
            room,
            customer,
            id_number,
            name,
            phone,
            expected_check_out,
            note,
        } => {
            let mut board = load_board(state).await?;
            let dialog = board.open_check_in(room).map_err(|e| anyhow::anyhow!(e.user_message()))?;
            dialog.expected_check_out = expected_check_out;
            dialog.note = note.unwrap_or_default();

            if let Some(customer_id) = customer {
                board
                    .select_customer(customer_id)
                    .map_err(|e| anyhow::anyhow!(e.user_message()))?;
            } else if let Some(id_number) = id_number {
                if board.lookup_customer_by_id_number(&id_number).is_none() {
                    if let Some(name) = name {
                        let payload = CustomerPayload {
                            ho_ten: name,
                            cmnd: Some(id_number),
                            so_dien_thoai: phone,
                            ..Default::default()
                        };
                        if board.create_customer(payload).await.is_err() {
                            print_notification(board.notification());
                            bail!("Could not create the customer");
                        }
                    }
                }
            }

            match board.submit_check_in().await {
                Ok(booking) => {
                    print_notification(board.notification());
                    println!("Booking {} for room {}", booking.id, room);
                }
                Err(e) => {
                    let inline = board
                        .check_in
                        .as_ref()
                        .and_then(|d| d.validation_error.clone());
                    print_notification(board.notification());
                    bail!(inline.unwrap_or_else(|| e.user_message()));
                }
            }
        }

        Command::CheckOut { room, confirm } => {
            let mut board = load_board(state).await?;
            let dialog = match board.open_check_out(room).await {
                Ok(dialog) => dialog.clone(),
                Err(e) => bail!(e.user_message()),
            };

            println!("Booking {}", dialog.booking_id);
            println!("  Room charges:    {:>14}", format_currency(dialog.breakdown.tong_tien_phong));
            println!("  Service charges: {:>14}", format_currency(dialog.breakdown.tong_tien_dich_vu));
            println!("  Total:           {:>14}", format_currency(dialog.displayed_total()));

            if !confirm {
                println!("\nRun again with --confirm to check out");
                return Ok(());
            }

            let result = board.confirm_check_out().await;
            print_notification(board.notification());
            let result = result.map_err(|e| anyhow::anyhow!(e.user_message()))?;
            if let Some(invoice) = result.invoice {
                println!(
                    "Invoice {}: {}",
                    invoice.id(),
                    format_currency(invoice.tong_tien)
                );
            }
        }

        Command::AddService {
            room,
            service,
            quantity,
            note,
        } => {
            let mut board = load_board(state).await?;
            if let Err(e) = board.open_services(room).await {
                bail!(e.user_message());
            }
            let added = board.add_service_usage(Some(service), quantity, note).await;
            print_notification(board.notification());
            added.map_err(|e| anyhow::anyhow!(e.user_message()))?;
            print_usages(&board);
        }

        Command::RemoveService { room, usage } => {
            let mut board = load_board(state).await?;
            if let Err(e) = board.open_services(room).await {
                bail!(e.user_message());
            }
            let removed = board.remove_service_usage(usage).await;
            print_notification(board.notification());
            removed.map_err(|e| anyhow::anyhow!(e.user_message()))?;
            print_usages(&board);
        }

        Command::CleanRoom { room } => {
            let mut board = load_board(state).await?;
            let cleaned = board.mark_room_cleaned(room).await;
            print_notification(board.notification());
            cleaned.map_err(|e| anyhow::anyhow!(e.user_message()))?;
        }

        Command::Stats { from, to, group } => {
            let today = chrono::Local::now().date_naive();
            let mut screen = StatisticsScreen::new(repo.stats.clone(), today);
            if from.is_some() {
                screen.query.tu_ngay = from;
            }
            if to.is_some() {
                screen.query.den_ngay = to;
            }
            if group.is_some() {
                screen.query.kieu = group;
            }

            if let Err(e) = screen.load().await {
                bail!(e.user_message());
            }
            if let Some(report) = &screen.report {
                for row in &report.rows {
                    println!("{:<12} {:>16}", row.thoi_gian, format_currency(row.doanh_thu));
                }
            }
            if let Some(summary) = screen.summary() {
                println!("\nTotal:   {}", format_currency(summary.total));
                println!("Average: {}", format_currency(summary.average_per_period()));
                if let Some((period, amount)) = summary.best_period {
                    println!("Best:    {} ({})", period, format_currency(amount));
                }
            }
        }

        Command::Settings { action } => {
            let settings = &state.services.settings;
            let current = match action {
                SettingsAction::Show => settings.current(),
                SettingsAction::Set { key, value } => settings
                    .set(&key, &value)
                    .map_err(|e| anyhow::anyhow!(e.user_message()))?,
                SettingsAction::Reset => settings.reset()?,
            };
            println!("{}", serde_json::to_string_pretty(&current)?);
        }
    }

    Ok(())
}

async fn load_list<R>(screen: &mut CrudScreen<R>, search: Option<String>) -> anyhow::Result<()>
where
    R: hotel_desk::repository::Resource,
    R::Record: Record,
    R::Payload: validator::Validate,
{
    if let Some(search) = search {
        screen.set_search(search);
    }
    if screen.load().await.is_err() {
        print_notification(screen.notification());
        bail!("Could not load the list");
    }
    Ok(())
}

async fn load_board(state: &AppState) -> anyhow::Result<DashboardScreen> {
    let mut board = DashboardScreen::new(state.repository.clone());
    if board.load().await.is_err() {
        print_notification(board.notification());
        bail!("Could not load the dashboard");
    }
    Ok(board)
}

fn print_usages(board: &DashboardScreen) {
    let Some(dialog) = &board.service_dialog else {
        return;
    };
    for usage in &dialog.usages {
        let name = usage
            .dich_vu_id
            .and_then(|id| board.service(id))
            .map(|s| s.ten_dich_vu.as_str())
            .unwrap_or("?");
        println!(
            "[{}] {:<24} x{:<3} {}",
            usage.id,
            name,
            usage.so_luong,
            format_optional_currency(usage.gia_tien)
        );
    }
    println!("Total: {}", format_currency(dialog.listed_total()));
}
