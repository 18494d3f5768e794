use std::collections::HashMap;

use carteira_types::{Area, HeaderProfile, Lookup, RequestKey};

/// Declare the standard request table once and derive the key constants, the
/// endpoint rows, and the header-profile rows from it.
macro_rules! request_table {
    (
        $( $(#[$meta:meta])* $const_name:ident => $name:literal, $area:ident, $path:literal, $profile:ident; )*
    ) => {
        /// Logical request keys understood by the standard registry.
        pub mod keys {
            use carteira_types::RequestKey;
            $(
                $(#[$meta])*
                pub const $const_name: RequestKey = RequestKey::from_static($name);
            )*
        }

        pub(crate) const STANDARD_ENDPOINTS: &[(&str, Area, &str)] = &[
            $( ($name, Area::$area, $path), )*
        ];

        pub(crate) const STANDARD_PROFILES: &[(&str, HeaderProfile)] = &[
            $( ($name, HeaderProfile::$profile), )*
        ];
    };
}

request_table! {
    /// `POST` username/password, returns access and refresh tokens.
    LOGIN => "login", Auth, "/api/auth/login/", Public;
    /// `POST` a new account.
    REGISTER => "register", Auth, "/api/auth/register/", Public;
    /// `POST` a refresh token for a new access token.
    REFRESH_TOKEN => "refreshToken", Auth, "/api/auth/token/refresh/", Public;
    /// `POST` a token for validation.
    VERIFY_TOKEN => "verifyToken", Auth, "/api/auth/token/verify/", Public;
    /// `POST` to invalidate the session server-side.
    LOGOUT => "logout", Auth, "/api/auth/logout/", Private;
    /// `GET` the authenticated user's profile.
    USER => "user", Auth, "/api/auth/user/", Private;
    /// `POST` profile changes.
    UPDATE_USER => "updateUser", Auth, "/api/auth/user/update/", Private;
    /// `POST` old/new password.
    CHANGE_PASSWORD => "changePassword", Auth, "/api/auth/password/change/", Private;
    /// `POST` an e-mail address to start a password reset.
    RESET_PASSWORD => "resetPassword", Auth, "/api/auth/password/reset/", Public;

    /// Monthly budget summary.
    BUDGET_OVERVIEW => "budgetOverview", Budget, "/api/budget/overview/", Private;
    /// Cost entries.
    BUDGET_COSTS => "budgetCosts", Budget, "/api/budget/custos/", Private;
    /// Income entries.
    BUDGET_INCOME => "budgetIncome", Budget, "/api/budget/entradas/", Private;
    /// Budget categories.
    BUDGET_CATEGORIES => "budgetCategories", Budget, "/api/budget/categorias/", Private;
    /// Category percentage targets.
    BUDGET_PERCENTAGES => "budgetPercentages", Budget, "/api/budget/porcentagens/", Private;
    /// Add a cost entry.
    BUDGET_ADD_COST => "budgetAddCost", Budget, "/api/budget/custos/adicionar/", Private;
    /// Add an income entry.
    BUDGET_ADD_INCOME => "budgetAddIncome", Budget, "/api/budget/entradas/adicionar/", Private;
    /// Delete a cost or income entry.
    BUDGET_DELETE_ENTRY => "budgetDeleteEntry", Budget, "/api/budget/deletar/", Private;
    /// Month-by-month history.
    BUDGET_MONTHLY => "budgetMonthly", Budget, "/api/budget/mensal/", Private;
    /// Savings goals.
    BUDGET_GOALS => "budgetGoals", Budget, "/api/budget/metas/", Private;
    /// Statement upload.
    BUDGET_UPLOAD => "budgetUpload", Budget, "/api/budget/upload/", Private;
    /// Budget report export.
    BUDGET_EXPORT => "budgetExport", Budget, "/api/budget/relatorio/export/", Private;

    /// Current positions.
    INVESTMENTS_PORTFOLIO => "investmentsPortfolio", Investments, "/api/investimentos/carteira/", Private;
    /// Add a position.
    INVESTMENTS_ADD => "investmentsAdd", Investments, "/api/investimentos/adicionar/", Private;
    /// Remove a position.
    INVESTMENTS_REMOVE => "investmentsRemove", Investments, "/api/investimentos/remover/", Private;
    /// Dividends received.
    INVESTMENTS_DIVIDENDS => "investmentsDividends", Investments, "/api/investimentos/dividendos/", Private;
    /// Transaction history.
    INVESTMENTS_HISTORY => "investmentsHistory", Investments, "/api/investimentos/historico/", Private;
    /// Real-estate fund (FII) positions.
    INVESTMENTS_FIIS => "investmentsFiis", Investments, "/api/investimentos/fiis/", Private;
    /// Stock positions.
    INVESTMENTS_STOCKS => "investmentsStocks", Investments, "/api/investimentos/acoes/", Private;
    /// Portfolio totals and allocation.
    INVESTMENTS_SUMMARY => "investmentsSummary", Investments, "/api/investimentos/resumo/", Private;

    /// Public ranking by asset type (`?tipo=`).
    RANKING_PUBLIC => "rankingPublic", Market, "/api/ranking/", Public;
    /// Ranking personalised for the user.
    RANKING_PRIVATE => "rankingPrivate", Market, "/api/ranking/privado/", Private;
    /// Quote for a ticker.
    MARKET_QUOTE => "marketQuote", Market, "/api/mercado/cotacao/", Public;
    /// Ticker search.
    MARKET_SEARCH => "marketSearch", Market, "/api/mercado/busca/", Public;
    /// Market indices (IBOV, IFIX, CDI, ...).
    MARKET_INDICES => "marketIndices", Market, "/api/mercado/indices/", Public;
    /// FII detail page.
    FII_DETAILS => "fiiDetails", Market, "/api/mercado/fii/", Public;
    /// Stock detail page.
    STOCK_DETAILS => "stockDetails", Market, "/api/mercado/acao/", Public;
    /// Dividend yield history.
    DIVIDEND_YIELD => "dividendYield", Market, "/api/mercado/dividend-yield/", Public;
    /// Market news.
    MARKET_NEWS => "marketNews", Market, "/api/mercado/noticias/", Public;

    /// Crypto holdings.
    CRYPTO_PORTFOLIO => "cryptoPortfolio", Crypto, "/api/cripto/carteira/", Private;
    /// Add a crypto holding.
    CRYPTO_ADD => "cryptoAdd", Crypto, "/api/cripto/adicionar/", Private;
    /// Remove a crypto holding.
    CRYPTO_REMOVE => "cryptoRemove", Crypto, "/api/cripto/remover/", Private;
    /// Spot prices.
    CRYPTO_PRICES => "cryptoPrices", Crypto, "/api/cripto/precos/", Public;
    /// Holding value over time.
    CRYPTO_HISTORY => "cryptoHistory", Crypto, "/api/cripto/historico/", Private;

    /// Liveness probe.
    HEALTH => "health", System, "/api/system/health/", Public;
    /// Backend version.
    VERSION => "version", System, "/api/system/version/", Public;
    /// User settings.
    SETTINGS => "settings", System, "/api/system/config/", Private;
    /// Notifications.
    NOTIFICATIONS => "notifications", System, "/api/system/notificacoes/", Private;
    /// Feedback form.
    FEEDBACK => "feedback", System, "/api/system/feedback/", Private;
}

#[derive(Debug, Clone, Copy)]
struct Entry {
    area: Area,
    path: &'static str,
}

/// Immutable map from logical request keys to relative backend paths.
#[derive(Debug, Clone)]
pub struct EndpointRegistry {
    entries: HashMap<RequestKey, Entry>,
}

impl Default for EndpointRegistry {
    fn default() -> Self {
        Self::standard()
    }
}

impl EndpointRegistry {
    /// The standard table covering auth, budget, investments, market, crypto, and system.
    #[must_use]
    pub fn standard() -> Self {
        Self::from_entries(STANDARD_ENDPOINTS.iter().copied())
    }

    /// Build a registry from `(key, area, path)` rows. Later rows win on duplicate keys.
    pub fn from_entries<I>(rows: I) -> Self
    where
        I: IntoIterator<Item = (&'static str, Area, &'static str)>,
    {
        let entries = rows
            .into_iter()
            .map(|(k, area, path)| (RequestKey::from_static(k), Entry { area, path }))
            .collect();
        Self { entries }
    }

    /// Tagged lookup with no side effects.
    #[must_use]
    pub fn lookup(&self, key: &str) -> Lookup {
        self.entries
            .get(key)
            .map_or(Lookup::NotFound, |e| Lookup::Found(e.path))
    }

    /// Path for `key`, or an empty string after logging a warning when the key is unknown.
    #[must_use]
    pub fn resolve(&self, key: &str) -> &'static str {
        match self.lookup(key) {
            Lookup::Found(path) => path,
            Lookup::NotFound => {
                #[cfg(feature = "tracing")]
                tracing::warn!(target: "carteira::registry", key, "unknown request key; resolving to empty path");
                ""
            }
        }
    }

    /// Domain area of a registered key.
    #[must_use]
    pub fn area(&self, key: &str) -> Option<Area> {
        self.entries.get(key).map(|e| e.area)
    }

    /// Returns true if `key` is registered.
    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Iterate registered keys in no particular order.
    pub fn keys(&self) -> impl Iterator<Item = &RequestKey> {
        self.entries.keys()
    }

    /// Number of registered keys.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if the registry is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
