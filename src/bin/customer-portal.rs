use clap::{Arg, ArgMatches, Command};
use std::process::ExitCode;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use customer_portal::app::App;
use customer_portal::config::ClientOptions;
use customer_portal::customers::Customer;
use customer_portal::error::Result;
use customer_portal::screens::Route;
use customer_portal::validation::{ContactForm, LoginForm, RegisterForm, ValidationErrors};
use customer_portal::CustomerPortal;

fn cli() -> Command<'static> {
    Command::new("customer-portal")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Manage customers through the customer API")
        .arg(
            Arg::new("api-url")
                .long("api-url")
                .value_name("URL")
                .takes_value(true)
                .help("Base URL of the customer API"),
        )
        .arg(
            Arg::new("session-dir")
                .long("session-dir")
                .value_name("DIR")
                .takes_value(true)
                .help("Directory where the session is kept"),
        )
        .arg(
            Arg::new("log-level")
                .long("log-level")
                .value_name("LEVEL")
                .takes_value(true)
                .default_value("warn")
                .help("Log filter, overridden by RUST_LOG"),
        )
        .subcommand_required(true)
        .subcommand(
            Command::new("login")
                .about("Sign in and store the session")
                .arg(required_arg("email", "Account email"))
                .arg(required_arg("password", "Account password")),
        )
        .subcommand(
            Command::new("register")
                .about("Create an account and store the session")
                .arg(required_arg("name", "Full name"))
                .arg(required_arg("email", "Account email"))
                .arg(required_arg("password", "Password"))
                .arg(required_arg("confirm-password", "Password again")),
        )
        .subcommand(Command::new("logout").about("Forget the stored session"))
        .subcommand(Command::new("whoami").about("Show the cached user profile"))
        .subcommand(
            Command::new("customers")
                .about("List, create and delete customers")
                .subcommand_required(true)
                .subcommand(Command::new("list").about("Show every customer"))
                .subcommand(
                    Command::new("add")
                        .about("Create a customer")
                        .arg(required_arg("name", "Customer name"))
                        .arg(required_arg("email", "Customer email")),
                )
                .subcommand(
                    Command::new("delete")
                        .about("Delete a customer")
                        .arg(required_arg("id", "Customer id")),
                ),
        )
}

fn required_arg(name: &'static str, help: &'static str) -> Arg<'static> {
    Arg::new(name)
        .long(name)
        .takes_value(true)
        .required(true)
        .help(help)
}

fn value(matches: &ArgMatches, name: &str) -> Option<String> {
    matches.value_of(name).map(str::to_string)
}

fn options(matches: &ArgMatches) -> Result<ClientOptions> {
    let mut options = ClientOptions::from_env()?.with_persist_session(true);
    if let Some(url) = matches.value_of("api-url") {
        options = options.with_api_url(url);
    }
    if let Some(dir) = matches.value_of("session-dir") {
        options = options.with_session_dir(dir);
    }
    Ok(options)
}

fn print_errors(errors: &ValidationErrors) {
    for (field, message) in errors.iter() {
        eprintln!("{}: {}", field, message);
    }
}

fn print_customer(customer: &Customer) {
    println!(
        "{}\t{}\t{}\t{}\t{}",
        customer.id,
        customer.name,
        customer.email,
        customer.status_label(),
        customer.created_at_display()
    );
}

/// Enter the customer list, reporting the redirect when there is no session
async fn open_customers(app: &mut App) -> bool {
    if app.navigate(Route::Customers).await == Route::Customers {
        true
    } else {
        eprintln!("Not signed in, redirected to {}. Run `customer-portal login` first.", Route::Login);
        false
    }
}

async fn run(matches: ArgMatches) -> Result<ExitCode> {
    let portal = CustomerPortal::new(options(&matches)?)?;
    let mut app = portal.app();

    let ok = match matches.subcommand() {
        Some(("login", sub)) => {
            let form = LoginForm {
                email: value(sub, "email"),
                password: value(sub, "password"),
            };
            let route = app.submit_login(form).await;
            let screen = app.login_screen();
            print_errors(screen.errors());
            if let Some(message) = screen.message() {
                eprintln!("{}", message);
            }
            route == Route::Customers
        }
        Some(("register", sub)) => {
            let form = RegisterForm {
                name: value(sub, "name"),
                email: value(sub, "email"),
                password: value(sub, "password"),
                confirm_password: value(sub, "confirm-password"),
            };
            let route = app.submit_register(form).await;
            let screen = app.register_screen();
            print_errors(screen.errors());
            if let Some(message) = screen.message() {
                eprintln!("{}", message);
            }
            route == Route::Customers
        }
        Some(("logout", _)) => {
            app.logout()?;
            println!("Signed out");
            true
        }
        Some(("whoami", _)) => match portal.auth().get_session() {
            Some(session) => {
                match session.user {
                    Some(user) => println!("{}", serde_json::to_string_pretty(user.as_value())?),
                    None => println!("Signed in (no cached profile)"),
                }
                true
            }
            None => {
                eprintln!("Not signed in");
                false
            }
        },
        Some(("customers", sub)) => {
            if !open_customers(&mut app).await {
                return Ok(ExitCode::FAILURE);
            }
            let Some(screen) = app.customers_screen_mut() else {
                return Ok(ExitCode::FAILURE);
            };

            match sub.subcommand() {
                Some(("list", _)) => {
                    screen.customers().iter().for_each(print_customer);
                    true
                }
                Some(("add", add)) => {
                    let form = ContactForm {
                        name: value(add, "name"),
                        email: value(add, "email"),
                    };
                    match screen.submit(form).await {
                        Some(customer) => {
                            print_customer(customer);
                            true
                        }
                        None => {
                            print_errors(screen.errors());
                            false
                        }
                    }
                }
                Some(("delete", delete)) => {
                    let id = value(delete, "id").unwrap_or_default();
                    screen.delete(&id).await
                }
                _ => false,
            }
        }
        _ => false,
    };

    Ok(if ok { ExitCode::SUCCESS } else { ExitCode::FAILURE })
}

#[tokio::main]
async fn main() -> ExitCode {
    dotenv::dotenv().ok();
    let matches = cli().get_matches();

    let log_level = matches.value_of("log-level").unwrap_or("warn").to_string();
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&log_level)),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    match run(matches).await {
        Ok(code) => code,
        Err(err) => {
            eprintln!("error: {}", err);
            ExitCode::FAILURE
        }
    }
}
