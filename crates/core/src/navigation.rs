//! Role-gated page routing.
//!
//! A small state machine over `{anonymous, authenticated with role R}`:
//! protected pages send anonymous callers to sign-in and send callers whose
//! role is not allowed to their default dashboard. This is a presentation
//! aid only; the API enforces authorization on its own.

use serde::Serialize;

use crate::roles::{ROLE_ADMIN, ROLE_SALESMAN};

pub const PATH_HOME: &str = "/";
pub const PATH_SIGN_IN: &str = "/auth";
pub const PATH_DASHBOARD: &str = "/dashboard";

/// Who may open a page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    Public,
    /// Any signed-in role.
    Authenticated,
    /// Signed in with one of the listed roles.
    Roles(&'static [&'static str]),
}

/// A page of the application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Page {
    Home,
    SignIn,
    Dashboard,
    Leads,
    LeadDetail,
    Users,
    Settings,
    TeamPerformance,
    MyLeads,
    Profile,
}

impl Page {
    pub const ALL: &'static [Page] = &[
        Page::Home,
        Page::SignIn,
        Page::Dashboard,
        Page::Leads,
        Page::LeadDetail,
        Page::Users,
        Page::Settings,
        Page::TeamPerformance,
        Page::MyLeads,
        Page::Profile,
    ];

    pub fn access(self) -> Access {
        const ADMIN_ONLY: &[&str] = &[ROLE_ADMIN];
        const SALESMAN_ONLY: &[&str] = &[ROLE_SALESMAN];
        match self {
            Page::Home | Page::SignIn => Access::Public,
            Page::Dashboard | Page::Profile | Page::LeadDetail => Access::Authenticated,
            Page::Leads | Page::Users | Page::Settings | Page::TeamPerformance => {
                Access::Roles(ADMIN_ONLY)
            }
            Page::MyLeads => Access::Roles(SALESMAN_ONLY),
        }
    }

    /// Canonical path; `LeadDetail` is a pattern with an id segment.
    pub fn path(self) -> &'static str {
        match self {
            Page::Home => PATH_HOME,
            Page::SignIn => PATH_SIGN_IN,
            Page::Dashboard => PATH_DASHBOARD,
            Page::Leads => "/dashboard/leads",
            Page::LeadDetail => "/dashboard/leads/{id}",
            Page::Users => "/dashboard/users",
            Page::Settings => "/dashboard/settings",
            Page::TeamPerformance => "/dashboard/performance",
            Page::MyLeads => "/dashboard/my-leads",
            Page::Profile => "/dashboard/profile",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            Page::Home => "Home",
            Page::SignIn => "Sign in",
            Page::Dashboard => "Dashboard",
            Page::Leads => "All Leads",
            Page::LeadDetail => "Lead Details",
            Page::Users => "Users",
            Page::Settings => "Settings",
            Page::TeamPerformance => "Team Performance",
            Page::MyLeads => "My Leads",
            Page::Profile => "Profile",
        }
    }

    /// Match a concrete path (query string and trailing slash ignored).
    pub fn from_path(path: &str) -> Option<Page> {
        let path = path.split(['?', '#']).next().unwrap_or_default();
        let trimmed = path.trim_end_matches('/');
        let path = if trimmed.is_empty() { PATH_HOME } else { trimmed };

        if let Some(id) = path.strip_prefix("/dashboard/leads/") {
            return (!id.is_empty() && id.bytes().all(|b| b.is_ascii_digit()))
                .then_some(Page::LeadDetail);
        }
        Page::ALL
            .iter()
            .copied()
            .filter(|p| *p != Page::LeadDetail)
            .find(|p| p.path() == path)
    }

    pub fn allows(self, role: Option<&str>) -> bool {
        match (self.access(), role) {
            (Access::Public, _) => true,
            (_, None) => false,
            (Access::Authenticated, Some(_)) => true,
            (Access::Roles(roles), Some(role)) => roles.contains(&role),
        }
    }
}

/// Landing page after sign-in and the fallback for forbidden pages.
pub fn default_dashboard(_role: &str) -> &'static str {
    PATH_DASHBOARD
}

/// Outcome of resolving a path for a caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum RouteDecision {
    Render { page: Page },
    Redirect { to: String },
    NotFound,
}

/// Resolve `path` for a caller whose role is `role` (`None` when signed out).
pub fn resolve(path: &str, role: Option<&str>) -> RouteDecision {
    let Some(page) = Page::from_path(path) else {
        return RouteDecision::NotFound;
    };
    if page.allows(role) {
        return RouteDecision::Render { page };
    }
    match role {
        None => RouteDecision::Redirect {
            to: PATH_SIGN_IN.to_string(),
        },
        Some(role) => RouteDecision::Redirect {
            to: default_dashboard(role).to_string(),
        },
    }
}

/// A navigation entry visible to a role.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MenuEntry {
    pub page: Page,
    pub title: &'static str,
    pub path: &'static str,
}

/// Dashboard pages (excluding the parameterised detail page) the role may open.
pub fn menu_for(role: &str) -> Vec<MenuEntry> {
    Page::ALL
        .iter()
        .copied()
        .filter(|p| !matches!(p, Page::Home | Page::SignIn | Page::LeadDetail))
        .filter(|p| p.allows(Some(role)))
        .map(|page| MenuEntry {
            page,
            title: page.title(),
            path: page.path(),
        })
        .collect()
}
