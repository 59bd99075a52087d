use clap::Args;
use safebite_core::{Config, LoginForm};

use super::{open_state, CommandResult};

#[derive(Args)]
pub struct LoginArgs {
    /// Email address
    #[arg(long)]
    pub email: String,
    /// Password (any non-empty value)
    #[arg(long)]
    pub password: String,
    /// Sign in for this run only
    #[arg(long)]
    pub no_remember: bool,
}

pub fn login(args: LoginArgs, config: &Config) -> CommandResult {
    let mut state = open_state()?;
    let form = LoginForm {
        remember: config.session.remember && !args.no_remember,
        ..LoginForm::new(args.email, args.password)
    };
    let user = state.login(&form)?;
    println!("Signed in as {}", user.email);
    if !form.remember {
        println!("Not remembered; later commands will ask you to sign in again.");
    }
    Ok(())
}

pub fn logout() -> CommandResult {
    let mut state = open_state()?;
    match state.logout() {
        Some(user) => println!("Signed out {}", user.email),
        None => println!("Not signed in"),
    }
    Ok(())
}

pub fn whoami() -> CommandResult {
    let state = open_state()?;
    let user = state.require_user()?;
    println!("{}", user.email);
    Ok(())
}
