// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{bail, Context, Result};

use crate::session::{AppContext, Session};
use crate::utils::valid_email;

pub fn login(ctx: &mut AppContext, sub: &clap::ArgMatches) -> Result<()> {
    let email = sub.get_one::<String>("email").unwrap();
    let password = sub.get_one::<String>("password").unwrap();
    if !valid_email(email) {
        bail!("'{}' is not a valid email address", email);
    }

    let reply = ctx.api.login(email, password)?;
    let token = match (reply.ec, reply.access_token) {
        (0, Some(token)) => token,
        _ => {
            let msg = if reply.em.trim().is_empty() {
                "Sign-in failed".to_string()
            } else {
                reply.em
            };
            bail!("{}", msg);
        }
    };

    ctx.tokens.save(&token)?;
    ctx.api.set_token(token);
    // The profile round-trip is what actually establishes the session; a
    // token that cannot resolve an identity is dropped on the spot.
    let user = match ctx.api.profile() {
        Ok(user) => user,
        Err(e) => {
            let _ = ctx.tokens.clear();
            ctx.api.clear_token();
            return Err(e).context("Signed in, but the profile could not be fetched");
        }
    };
    println!("Signed in as {} <{}>", user.name, user.email);
    ctx.session = Session::signed_in(user);
    Ok(())
}

pub fn register(ctx: &AppContext, sub: &clap::ArgMatches) -> Result<()> {
    let name = sub.get_one::<String>("name").unwrap();
    let email = sub.get_one::<String>("email").unwrap();
    let password = sub.get_one::<String>("password").unwrap();
    if name.trim().is_empty() {
        bail!("Name must not be empty");
    }
    if !valid_email(email) {
        bail!("'{}' is not a valid email address", email);
    }

    let reply = ctx.api.register(name, email, password)?;
    if !reply.ok() {
        bail!("{}", reply.err_message("Registration failed"));
    }
    println!("Account created for {}; run `moneylens login` to sign in", email);
    Ok(())
}

pub fn logout(ctx: &mut AppContext) -> Result<()> {
    ctx.tokens.clear()?;
    ctx.api.clear_token();
    ctx.session = Session::signed_out();
    println!("Signed out");
    Ok(())
}

pub fn whoami(ctx: &AppContext) -> Result<()> {
    match &ctx.session.user {
        Some(user) => {
            println!("{} <{}> (id {})", user.name, user.email, user.id);
            Ok(())
        }
        None => bail!("Not signed in"),
    }
}
