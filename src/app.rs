//! The console shell: owns the router and the backend client, applies each
//! navigation outcome and loads the data for whichever view ends up shown.

use serde::Serialize;
use serde_json::{Value, json};
use tracing::info;

use crate::client::Client;
use crate::config::AppConfig;
use crate::error::Result;
use crate::router::{Navigation, Resolved, RouteTable, Router, View};
use crate::security::{FileSessionStore, Session, decode_claims, is_expired};
use crate::types::FinanceFilters;

/// A rendered view.
#[derive(Debug, Clone, Serialize)]
pub struct Page {
    pub requested: String,
    pub path: String,
    pub view: String,
    pub redirected: bool,
    pub data: Value,
}

#[derive(Debug, Clone)]
pub struct App {
    router: Router,
    client: Client,
}

impl App {
    pub fn new(router: Router, client: Client) -> Self {
        Self { router, client }
    }

    /// Wire up the console from configuration, with the session persisted at
    /// `config.session.path`.
    pub fn from_config(config: &AppConfig) -> Result<Self> {
        let session = Session::new(FileSessionStore::new(&config.session.path));
        let table = RouteTable::new(
            RouteTable::standard_routes(),
            &config.routes.login_path,
            &config.routes.default_path,
        )?;
        let client = Client::with_timeout(&config.api.base_url, config.api.timeout(), session.clone())?;
        Ok(Self::new(Router::new(table, session), client))
    }

    pub fn router(&self) -> &Router {
        &self.router
    }

    pub fn client(&self) -> &Client {
        &self.client
    }

    pub fn session(&self) -> &Session {
        self.client.session()
    }

    /// Navigate to `path` and load the data of the view that is shown.
    pub async fn open(&self, path: &str) -> Result<Page> {
        let resolved = self.router.navigate(path);
        let data = self.load(&resolved).await?;
        Ok(Page {
            requested: resolved.requested.clone(),
            path: resolved.route.path.clone(),
            view: resolved.route.name.clone(),
            redirected: resolved.outcome != Navigation::Proceed,
            data,
        })
    }

    /// Navigation bar entries for the current session.
    pub fn menu(&self) -> Vec<(String, String)> {
        let role = self.session().role();
        self.router
            .table()
            .menu(role.as_deref())
            .into_iter()
            .map(|r| (r.path.clone(), r.name.clone()))
            .collect()
    }

    async fn load(&self, resolved: &Resolved) -> Result<Value> {
        let client = &self.client;
        info!(name: "view.load", view = %resolved.route.name, "Loading view data");
        let data = match resolved.route.view {
            View::Landing => json!({ "login": self.router.table().login_route().path }),
            View::Login | View::ForgotPassword | View::ResetPassword => Value::Null,
            View::Homepage => json!({
                "user": self.whoami(),
                "menu": self
                    .menu()
                    .into_iter()
                    .map(|(path, name)| json!({ "path": path, "name": name }))
                    .collect::<Vec<_>>(),
            }),
            View::Users | View::Admin => serde_json::to_value(client.users().list().await?)?,
            View::Vehicles => serde_json::to_value(client.vehicles().list().await?)?,
            View::Orders => serde_json::to_value(client.orders().list().await?)?,
            View::Forms => json!({
                "questions": client.forms().questions().await?,
                "types": client.forms().question_types().await?,
            }),
            View::Submissions => json!({
                "submissions": client.submissions().list().await?,
                "stats": client.submissions().stats().await?,
            }),
            View::Expenses => json!({
                "expenses": client.expenses().list().await?,
                "types": client.expenses().types().await?,
            }),
            View::Finance => json!({
                "records": client.finance().records(&FinanceFilters::default()).await?,
                "summary": client.finance().summary(&FinanceFilters::default()).await?,
            }),
            View::Reports => json!({
                "financial": client.reports().financial().await?,
                "incomePerMonth": client.reports().income_per_month().await?,
                "expensesPerMonth": client.reports().expenses_per_month().await?,
                "expensesPerType": client.reports().expenses_per_type().await?,
                "orderTypes": client.reports().order_type_distribution().await?,
            }),
            View::Performance => json!({
                "kpis": client.kpi().current().await?,
                "goals": client.kpi().goals().await?,
                "drivers": client.reports().drivers().await?,
            }),
        };
        Ok(data)
    }

    /// Claims of the current session, or `null` without a live token.
    ///
    /// An expired token is reported as `null`; erasing it is left to the next
    /// guarded navigation.
    pub fn whoami(&self) -> Value {
        self.session()
            .token()
            .filter(|t| !is_expired(t))
            .and_then(|t| decode_claims(&t).ok())
            .map_or(Value::Null, |claims| {
                json!({
                    "name": claims.name,
                    "email": claims.email,
                    "role": claims.role,
                    "exp": claims.exp,
                })
            })
    }
}
