// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::api::ApiError;
use crate::config::Config;
use crate::session::AppContext;
use crate::utils::pretty_table;
use anyhow::Result;

pub fn handle(ctx: &AppContext, config: &Config) -> Result<()> {
    let mut rows = Vec::new();

    rows.push(vec!["api_url".into(), config.api_url.clone()]);

    // 1) Stored credentials (a token rejected at startup has already been
    // cleared by session resolution)
    rows.push(vec![
        "token".into(),
        if ctx.tokens.load().is_some() {
            "present".into()
        } else {
            "absent; run `moneylens login`".into()
        },
    ]);

    // 2) Reachability and session validity via the profile round-trip; an
    // auth rejection still proves the server answered
    match ctx.api.profile() {
        Ok(user) => {
            rows.push(vec!["server".into(), "reachable".into()]);
            rows.push(vec!["session".into(), format!("valid ({})", user.email)]);
        }
        Err(ApiError::Transport(e)) => {
            rows.push(vec!["server".into(), format!("unreachable: {}", e)]);
        }
        Err(ApiError::Auth(_)) => {
            rows.push(vec!["server".into(), "reachable".into()]);
            rows.push(vec![
                "session".into(),
                "not signed in; run `moneylens login`".into(),
            ]);
        }
        Err(e) => rows.push(vec!["server".into(), e.to_string()]),
    }

    println!("{}", pretty_table(&["Check", "Status"], rows));
    Ok(())
}
