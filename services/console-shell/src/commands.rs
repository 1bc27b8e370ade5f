//! Line commands for the interactive shell.

use wc_console::{LoginViewModel, Outcome, Selection, SettingViewModel};
use wc_console::state::{IdentityState, NetworkState};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SettingCommand {
    Show,
    Reload,
    Contract,
    ImportAccount,
    CreateAccount,
    RemoveAccount,
    UseAccount(String),
    CreateIdentity,
    ImportIdentity,
    RemoveIdentity,
    UseIdentity(String),
    Network(String),
    ClearKeys,
    Help,
    Quit,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoginCommand {
    Show,
    Select(String),
    Password,
    Login,
    CreateIdentity,
    ClearKey,
    Network(String),
    Close,
    Help,
    Quit,
}

pub const SETTING_HELP: &str = "\
commands:
  show                      print contract, network, accounts and identities
  reload                    reload everything from the backend
  contract                  change the contract address
  import-account            import an account from a private key
  create-account            create a new account
  remove-account            remove the selected account
  use-account <address>     make <address> the default account
  create-identity           create a new identity
  import-identity           import an identity from a private key
  remove-identity           remove the selected identity
  use-identity <ont_id>     make <ont_id> the default identity
  network <name>            switch to MainNet, TestNet or Localhost
  clear-keys                hide any newly created private keys
  quit";

pub const LOGIN_HELP: &str = "\
commands:
  show                      print identities and network
  select <ont_id>           choose the identity to unlock
  password                  enter the identity password
  login                     unlock the selected identity
  create-identity           create a new identity
  clear-key                 hide the newly created private key
  network <name>            switch to MainNet, TestNet or Localhost
  close                     close the login dialog
  quit";

fn split(line: &str) -> Option<(&str, &str)> {
    let line = line.trim();
    if line.is_empty() {
        return None;
    }
    Some(match line.split_once(char::is_whitespace) {
        Some((head, rest)) => (head, rest.trim()),
        None => (line, ""),
    })
}

fn argument(rest: &str) -> Result<String, String> {
    if rest.is_empty() {
        Err("missing argument".to_owned())
    } else {
        Ok(rest.to_owned())
    }
}

pub fn parse_setting(line: &str) -> Option<Result<SettingCommand, String>> {
    let (head, rest) = split(line)?;
    let command = match head {
        "show" => Ok(SettingCommand::Show),
        "reload" => Ok(SettingCommand::Reload),
        "contract" => Ok(SettingCommand::Contract),
        "import-account" => Ok(SettingCommand::ImportAccount),
        "create-account" => Ok(SettingCommand::CreateAccount),
        "remove-account" => Ok(SettingCommand::RemoveAccount),
        "use-account" => argument(rest).map(SettingCommand::UseAccount),
        "create-identity" => Ok(SettingCommand::CreateIdentity),
        "import-identity" => Ok(SettingCommand::ImportIdentity),
        "remove-identity" => Ok(SettingCommand::RemoveIdentity),
        "use-identity" => argument(rest).map(SettingCommand::UseIdentity),
        "network" => argument(rest).map(SettingCommand::Network),
        "clear-keys" => Ok(SettingCommand::ClearKeys),
        "help" | "?" => Ok(SettingCommand::Help),
        "quit" | "exit" => Ok(SettingCommand::Quit),
        other => Err(format!("unknown command: {other}")),
    };
    Some(command)
}

pub fn parse_login(line: &str) -> Option<Result<LoginCommand, String>> {
    let (head, rest) = split(line)?;
    let command = match head {
        "show" => Ok(LoginCommand::Show),
        "select" => argument(rest).map(LoginCommand::Select),
        "password" => Ok(LoginCommand::Password),
        "login" => Ok(LoginCommand::Login),
        "create-identity" => Ok(LoginCommand::CreateIdentity),
        "clear-key" => Ok(LoginCommand::ClearKey),
        "network" => argument(rest).map(LoginCommand::Network),
        "close" => Ok(LoginCommand::Close),
        "help" | "?" => Ok(LoginCommand::Help),
        "quit" | "exit" => Ok(LoginCommand::Quit),
        other => Err(format!("unknown command: {other}")),
    };
    Some(command)
}

/// Returns `false` when the loop should stop.
pub async fn run_setting(vm: &SettingViewModel, command: SettingCommand) -> bool {
    let outcome = match command {
        SettingCommand::Show => {
            print_setting(vm);
            return true;
        }
        SettingCommand::Reload => {
            vm.on_load().await;
            print_setting(vm);
            return true;
        }
        SettingCommand::Help => {
            println!("{SETTING_HELP}");
            return true;
        }
        SettingCommand::Quit => return false,
        SettingCommand::ClearKeys => {
            vm.clear_new_account_private_key();
            vm.clear_new_identity_private_key();
            return true;
        }
        SettingCommand::Contract => vm.change_contract().await,
        SettingCommand::ImportAccount => vm.import_account().await,
        SettingCommand::CreateAccount => vm.create_account().await,
        SettingCommand::RemoveAccount => vm.remove_account().await,
        SettingCommand::UseAccount(address) => vm.change_account(&address).await,
        SettingCommand::CreateIdentity => vm.create_identity().await,
        SettingCommand::ImportIdentity => vm.import_identity().await,
        SettingCommand::RemoveIdentity => vm.remove_identity().await,
        SettingCommand::UseIdentity(ont_id) => vm.change_identity(&ont_id).await,
        SettingCommand::Network(name) => vm.change_network_by_name(&name).await,
    };
    if outcome == Outcome::Done {
        print_setting(vm);
    }
    true
}

pub async fn run_login(vm: &LoginViewModel, command: LoginCommand) -> bool {
    match command {
        LoginCommand::Show => print_login(vm),
        LoginCommand::Select(ont_id) => {
            if !vm.select_login_identity(&ont_id) {
                println!("no identity {ont_id}");
            }
        }
        LoginCommand::Password => {
            if let Some(password) = crate::terminal::read_secret("identity password: ") {
                vm.set_password(&password);
            }
        }
        LoginCommand::Login => {
            vm.login().await;
        }
        LoginCommand::CreateIdentity => {
            if vm.create_identity().await == Outcome::Done {
                print_login(vm);
            }
        }
        LoginCommand::ClearKey => vm.clear_new_identity_private_key(),
        LoginCommand::Network(name) => {
            vm.change_network_by_name(&name).await;
        }
        LoginCommand::Close => {
            vm.close_dialog().await;
        }
        LoginCommand::Help => println!("{LOGIN_HELP}"),
        LoginCommand::Quit => return false,
    }
    true
}

fn print_selection(title: &str, selection: &Selection) {
    println!("{title}:");
    if selection.is_empty() {
        println!("  (none)");
    }
    for option in selection.options() {
        let marker = if selection.selected() == Some(option.value.as_str()) { '*' } else { ' ' };
        println!(" {marker} {}  {}", option.value, option.label);
    }
}

fn print_network(network: &NetworkState) {
    let names: Vec<String> = network
        .options()
        .iter()
        .map(|option| {
            if *option == network.selected {
                format!("[{}]", option.label())
            } else {
                option.label().to_owned()
            }
        })
        .collect();
    println!("network: {}", names.join("  "));
}

fn print_new_identity(identities: &IdentityState) {
    if identities.new_private_key.is_visible() {
        println!("new identity: {}", identities.new_ont_id);
        println!("  private key (shown once): {}", identities.new_private_key.value());
    }
}

pub fn print_setting(vm: &SettingViewModel) {
    println!("contract: {}", vm.contract_address.snapshot());
    print_network(&vm.network.snapshot());
    vm.accounts.with(|s| {
        print_selection("accounts", &s.accounts);
        if s.new_private_key.is_visible() {
            println!("  new account private key (shown once): {}", s.new_private_key.value());
        }
    });
    vm.identities.with(|s| {
        print_selection("identities", &s.identities);
        print_new_identity(s);
    });
}

pub fn print_login(vm: &LoginViewModel) {
    print_network(&vm.network.snapshot());
    vm.identities.with(|s| {
        print_selection("identities", &s.identities);
        print_new_identity(s);
    });
}
