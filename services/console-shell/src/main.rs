//! Interactive terminal front-end for the wallet console view-models.

mod commands;
mod terminal;

use anyhow::Context;
use clap::{Parser, Subcommand};
use std::rc::Rc;
use tracing::info;
use wc_backend_http::HttpTransport;
use wc_console::config::parse_route_manifest;
use wc_console::{Capabilities, ConsoleConfig, LoginViewModel, ManagerClient, SettingViewModel};

use crate::terminal::{TerminalNavigator, TerminalNotifier, TerminalPrompter, TokioTimer};

#[derive(Parser)]
#[command(name = "console-shell")]
#[command(about = "Terminal front-end for the wallet management console")]
struct Cli {
    #[command(subcommand)]
    view: View,

    /// Backend base URL (overrides WALLET_CONSOLE_URL)
    #[arg(long)]
    url: Option<String>,

    /// JSON route manifest mapping endpoint names to paths (overrides WALLET_CONSOLE_ROUTES)
    #[arg(long)]
    routes: Option<String>,
}

#[derive(Subcommand, Clone, Copy)]
enum View {
    /// Contract, account, identity and network settings
    Setting,
    /// Identity unlock dialog
    Login,
}

fn load_config(cli: &Cli) -> anyhow::Result<ConsoleConfig> {
    let mut config = ConsoleConfig::from_env()?;
    if let Some(url) = &cli.url {
        config = config.with_base_url(url.clone());
    }
    if let Some(path) = &cli.routes {
        let text = std::fs::read_to_string(path).with_context(|| format!("failed to read {path}"))?;
        config.routes = parse_route_manifest(&text)?;
    }
    Ok(config)
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = load_config(&cli)?;
    info!("console backend at {}", config.base_url);

    let navigator = Rc::new(TerminalNavigator::default());
    let caps = Capabilities {
        client: ManagerClient::new(Rc::new(HttpTransport::new()), config),
        prompter: Rc::new(TerminalPrompter),
        notifier: Rc::new(TerminalNotifier),
        navigator: navigator.clone(),
        timer: Rc::new(TokioTimer),
    };

    match cli.view {
        View::Setting => setting_loop(SettingViewModel::new(caps), &navigator).await,
        View::Login => login_loop(LoginViewModel::new(caps), &navigator).await,
    }
    Ok(())
}

async fn setting_loop(vm: SettingViewModel, navigator: &TerminalNavigator) {
    vm.on_load().await;
    commands::print_setting(&vm);
    println!("type 'help' for commands");

    while let Some(line) = terminal::read_line("setting> ") {
        let Some(parsed) = commands::parse_setting(&line) else {
            continue;
        };
        match parsed {
            Ok(command) => {
                if !commands::run_setting(&vm, command).await {
                    break;
                }
            }
            Err(message) => println!("{message}"),
        }
        follow_navigation(navigator);
    }
}

async fn login_loop(vm: LoginViewModel, navigator: &TerminalNavigator) {
    vm.on_load().await;
    commands::print_login(&vm);
    println!("type 'help' for commands");

    while let Some(line) = terminal::read_line("login> ") {
        let Some(parsed) = commands::parse_login(&line) else {
            continue;
        };
        match parsed {
            Ok(command) => {
                if !commands::run_login(&vm, command).await {
                    break;
                }
            }
            Err(message) => println!("{message}"),
        }
        if follow_navigation(navigator) {
            vm.on_load().await;
            commands::print_login(&vm);
        }
    }
}

/// Report pending navigation. Returns `true` when a reload was requested.
fn follow_navigation(navigator: &TerminalNavigator) -> bool {
    if let Some(url) = navigator.take_location() {
        println!("-> {url}");
    }
    let reload = navigator.take_reload();
    if reload {
        println!("-> reload");
    }
    reload
}
