// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Context, Result};
use chrono::NaiveDate;

use crate::api::{ApiClient, ApiError};
use crate::config::{Config, TokenStore};
use crate::models::{Account, Budget, Category, EntryKind, Notification, Transaction, User};
use crate::notify::NotificationCenter;

/// The process-wide authentication state, created once at startup from the
/// stored token and owned by the [`AppContext`].
#[derive(Debug, Clone, Default)]
pub struct Session {
    pub authenticated: bool,
    pub user: Option<User>,
}

impl Session {
    pub fn signed_out() -> Self {
        Self::default()
    }

    pub fn signed_in(user: User) -> Self {
        Self {
            authenticated: true,
            user: Some(user),
        }
    }
}

/// Resolve the stored token into a session. No token means signed out with no
/// request issued; a token that fails the profile round-trip for any reason
/// (transport or server-side) is cleared and the session is signed out; the
/// distinction is not surfaced.
pub fn resolve(api: &mut ApiClient, tokens: &TokenStore) -> Session {
    let Some(token) = tokens.load() else {
        return Session::signed_out();
    };
    api.set_token(token);
    match api.profile() {
        Ok(user) => Session::signed_in(user),
        Err(_) => {
            let _ = tokens.clear();
            api.clear_token();
            Session::signed_out()
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Redirect {
    /// Protected command, signed out: go sign in.
    Login,
    /// Login/register while already signed in: nothing to do here.
    Home,
}

/// Gate decision for one dispatch. `entry` marks the login/register commands
/// (the auth screens); everything else is protected.
pub fn gate(entry: bool, authenticated: bool) -> Option<Redirect> {
    match (entry, authenticated) {
        (false, false) => Some(Redirect::Login),
        (true, true) => Some(Redirect::Home),
        _ => None,
    }
}

/// Everything a command needs, passed explicitly: the API client, the
/// resolved session, and the token store.
pub struct AppContext {
    pub api: ApiClient,
    pub session: Session,
    pub tokens: TokenStore,
}

impl AppContext {
    pub fn connect(config: &Config) -> Result<Self> {
        let mut api = ApiClient::new(&config.api_url)?;
        let tokens = TokenStore::open()?;
        let session = resolve(&mut api, &tokens);
        Ok(Self {
            api,
            session,
            tokens,
        })
    }

    pub fn center(&self) -> NotificationCenter {
        NotificationCenter::new(self.api.clone(), self.session.authenticated)
    }

    // Collection reads are scoped to the session: signed out means an empty
    // list and no request on the wire.

    pub fn accounts(&self) -> Result<Vec<Account>, ApiError> {
        if !self.session.authenticated {
            return Ok(Vec::new());
        }
        self.api.list_accounts()
    }

    pub fn categories(&self) -> Result<Vec<Category>, ApiError> {
        if !self.session.authenticated {
            return Ok(Vec::new());
        }
        self.api.list_categories()
    }

    pub fn budgets(&self) -> Result<Vec<Budget>, ApiError> {
        if !self.session.authenticated {
            return Ok(Vec::new());
        }
        self.api.list_budgets()
    }

    pub fn transactions(
        &self,
        range: Option<(NaiveDate, NaiveDate)>,
    ) -> Result<Vec<Transaction>, ApiError> {
        if !self.session.authenticated {
            return Ok(Vec::new());
        }
        self.api.list_transactions(range)
    }

    pub fn notifications(&self) -> Result<Vec<Notification>, ApiError> {
        if !self.session.authenticated {
            return Ok(Vec::new());
        }
        self.api.list_notifications()
    }

    pub fn account_named(&self, name: &str) -> Result<Account> {
        let accounts = self.accounts()?;
        accounts
            .into_iter()
            .find(|a| a.name == name)
            .with_context(|| format!("Account '{}' not found", name))
    }

    /// Resolve a category by name among those selectable for `kind`; a name
    /// that exists with the other kind is rejected before any mutation is
    /// sent.
    pub fn category_named(&self, name: &str, kind: EntryKind) -> Result<Category> {
        let categories = self.categories()?;
        select_category(&categories, name, kind).map(Category::clone)
    }
}

/// The selectable set for a given direction: only categories of that kind
/// are ever offered.
pub fn selectable<'a>(categories: &'a [Category], kind: EntryKind) -> Vec<&'a Category> {
    categories.iter().filter(|c| c.r#type == kind).collect()
}

pub fn select_category<'a>(
    categories: &'a [Category],
    name: &str,
    kind: EntryKind,
) -> Result<&'a Category> {
    if let Some(cat) = categories
        .iter()
        .find(|c| c.name == name && c.r#type == kind)
    {
        return Ok(cat);
    }
    if let Some(other) = categories.iter().find(|c| c.name == name) {
        anyhow::bail!(
            "Category '{}' is an {} category and cannot be used for an {} entry",
            name,
            other.r#type.as_str(),
            kind.as_str()
        );
    }
    anyhow::bail!("Category '{}' not found", name)
}
