// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{bail, Result};

use moneylens::{cli, commands, config, session};

fn main() -> Result<()> {
    let cli = cli::build_cli();
    let matches = cli.get_matches();

    let Some((name, sub)) = matches.subcommand() else {
        cli::build_cli().print_help()?;
        println!();
        return Ok(());
    };

    let cfg = config::Config::load()?;

    // Config management needs no session and no network.
    if name == "config" {
        return match sub.subcommand() {
            Some(("show", _)) => {
                println!("api_url = {}", cfg.api_url);
                println!("data dir = {}", config::data_dir()?.display());
                Ok(())
            }
            Some(("set-url", s)) => {
                let url = s.get_one::<String>("url").unwrap();
                let mut cfg = cfg;
                cfg.api_url = url.trim_end_matches('/').to_string();
                cfg.save()?;
                println!("API base URL set to {}", cfg.api_url);
                Ok(())
            }
            _ => Ok(()),
        };
    }

    let mut ctx = session::AppContext::connect(&cfg)?;

    // Route gate: doctor is open; login/register are the entry screens;
    // everything else needs an authenticated session.
    if name != "doctor" {
        let entry = matches!(name, "login" | "register");
        match session::gate(entry, ctx.session.authenticated) {
            Some(session::Redirect::Login) => {
                bail!("You are not signed in; run `moneylens login` first");
            }
            Some(session::Redirect::Home) => {
                let who = ctx
                    .session
                    .user
                    .as_ref()
                    .map(|u| u.email.clone())
                    .unwrap_or_default();
                println!("Already signed in as {}; run `moneylens logout` first", who);
                return Ok(());
            }
            None => {}
        }
    }

    match (name, sub) {
        ("login", sub) => commands::auth::login(&mut ctx, sub)?,
        ("register", sub) => commands::auth::register(&ctx, sub)?,
        ("logout", _) => commands::auth::logout(&mut ctx)?,
        ("whoami", _) => commands::auth::whoami(&ctx)?,
        ("account", sub) => commands::accounts::handle(&ctx, sub)?,
        ("category", sub) => commands::categories::handle(&ctx, sub)?,
        ("tx", sub) => commands::transactions::handle(&ctx, sub)?,
        ("budget", sub) => commands::budgets::handle(&ctx, sub)?,
        ("noti", sub) => commands::notifications::handle(&ctx, sub)?,
        ("report", sub) => commands::reports::handle(&ctx, sub)?,
        ("export", sub) => commands::exporter::handle(&ctx, sub)?,
        ("doctor", _) => commands::doctor::handle(&ctx, &cfg)?,
        _ => {
            cli::build_cli().print_help()?;
            println!();
        }
    }
    Ok(())
}
