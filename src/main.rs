use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use axum::extract::MatchedPath;
use dotenvy::dotenv;
use http::{HeaderName, HeaderValue};
use tokio::task::JoinHandle;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{error, info};

use rental_api::bootstrap::app_context::{AppContext, AppServices};
use rental_api::bootstrap::config::Config;
use rental_api::infrastructure::db::repositories::{
    account_repository_sqlx::SqlxAccountRepository,
    bank_account_repository_sqlx::SqlxBankAccountRepository,
    financial_repository_sqlx::SqlxFinancialRepository,
    investment_company_repository_sqlx::SqlxInvestmentCompanyRepository,
    lease_repository_sqlx::SqlxLeaseRepository, mortgage_repository_sqlx::SqlxMortgageRepository,
    notification_repository_sqlx::SqlxNotificationRepository,
    owner_repository_sqlx::SqlxOwnerRepository,
    ownership_repository_sqlx::SqlxOwnershipRepository,
    plot_info_repository_sqlx::SqlxPlotInfoRepository,
    property_repository_sqlx::SqlxPropertyRepository, tenant_repository_sqlx::SqlxTenantRepository,
    unit_repository_sqlx::SqlxUnitRepository, valuation_repository_sqlx::SqlxValuationRepository,
};
use rental_api::infrastructure::imports::history_store::InMemoryImportHistory;
use rental_api::infrastructure::notifications::log_sender::LogNotificationSender;
use rental_api::presentation::http as routes;
use rental_api::presentation::http::account::ACCOUNT_HEADER;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

#[derive(OpenApi)]
#[openapi(
        paths(
            rental_api::presentation::http::health::health,
            rental_api::presentation::http::accounts::list_accounts,
            rental_api::presentation::http::accounts::create_account,
            rental_api::presentation::http::bank_accounts::list_bank_accounts,
            rental_api::presentation::http::bank_accounts::list_active_bank_accounts,
            rental_api::presentation::http::bank_accounts::get_bank_account,
            rental_api::presentation::http::bank_accounts::create_bank_account,
            rental_api::presentation::http::bank_accounts::update_bank_account,
            rental_api::presentation::http::bank_accounts::activate_bank_account,
            rental_api::presentation::http::bank_accounts::deactivate_bank_account,
            rental_api::presentation::http::bank_accounts::list_bank_account_mortgages,
            rental_api::presentation::http::bank_accounts::delete_bank_account,
            rental_api::presentation::http::properties::list_properties,
            rental_api::presentation::http::properties::get_property,
            rental_api::presentation::http::properties::create_property,
            rental_api::presentation::http::properties::update_property,
            rental_api::presentation::http::properties::delete_property,
            rental_api::presentation::http::properties::property_statistics,
            rental_api::presentation::http::properties::portfolio_summary,
            rental_api::presentation::http::properties::portfolio_valuation_history,
            rental_api::presentation::http::properties::valuation_history,
            rental_api::presentation::http::plot_info::create_plot_info,
            rental_api::presentation::http::plot_info::get_property_plot_info,
            rental_api::presentation::http::plot_info::get_plot_info,
            rental_api::presentation::http::plot_info::update_plot_info,
            rental_api::presentation::http::plot_info::delete_plot_info,
            rental_api::presentation::http::units::list_units,
            rental_api::presentation::http::units::get_unit,
            rental_api::presentation::http::units::create_unit,
            rental_api::presentation::http::units::update_unit,
            rental_api::presentation::http::units::delete_unit,
            rental_api::presentation::http::tenants::list_tenants,
            rental_api::presentation::http::tenants::get_tenant,
            rental_api::presentation::http::tenants::create_tenant,
            rental_api::presentation::http::tenants::update_tenant,
            rental_api::presentation::http::tenants::delete_tenant,
            rental_api::presentation::http::leases::list_leases,
            rental_api::presentation::http::leases::get_lease,
            rental_api::presentation::http::leases::create_lease,
            rental_api::presentation::http::leases::update_lease,
            rental_api::presentation::http::leases::terminate_lease,
            rental_api::presentation::http::leases::delete_lease,
            rental_api::presentation::http::leases::refresh_lease_statuses,
            rental_api::presentation::http::leases::expiration_timeline,
            rental_api::presentation::http::owners::list_owners,
            rental_api::presentation::http::owners::get_owner,
            rental_api::presentation::http::owners::create_owner,
            rental_api::presentation::http::owners::update_owner,
            rental_api::presentation::http::owners::delete_owner,
            rental_api::presentation::http::owners::list_owner_properties,
            rental_api::presentation::http::ownerships::create_ownership,
            rental_api::presentation::http::ownerships::list_property_ownerships,
            rental_api::presentation::http::ownerships::ownership_summary,
            rental_api::presentation::http::ownerships::get_ownership,
            rental_api::presentation::http::ownerships::update_ownership,
            rental_api::presentation::http::ownerships::delete_ownership,
            rental_api::presentation::http::mortgages::list_mortgages,
            rental_api::presentation::http::mortgages::mortgage_summary,
            rental_api::presentation::http::mortgages::get_mortgage,
            rental_api::presentation::http::mortgages::create_mortgage,
            rental_api::presentation::http::mortgages::update_mortgage,
            rental_api::presentation::http::mortgages::delete_mortgage,
            rental_api::presentation::http::mortgages::list_payments,
            rental_api::presentation::http::mortgages::record_payment,
            rental_api::presentation::http::mortgages::delete_payment,
            rental_api::presentation::http::financials::list_expenses,
            rental_api::presentation::http::financials::create_expense,
            rental_api::presentation::http::financials::update_expense,
            rental_api::presentation::http::financials::delete_expense,
            rental_api::presentation::http::financials::list_income,
            rental_api::presentation::http::financials::create_income,
            rental_api::presentation::http::financials::update_income,
            rental_api::presentation::http::financials::delete_income,
            rental_api::presentation::http::financials::financial_summary,
            rental_api::presentation::http::financials::financial_breakdown,
            rental_api::presentation::http::financials::property_financial_dashboard,
            rental_api::presentation::http::valuations::create_valuation,
            rental_api::presentation::http::valuations::list_property_valuations,
            rental_api::presentation::http::valuations::latest_valuation,
            rental_api::presentation::http::valuations::get_valuation,
            rental_api::presentation::http::valuations::update_valuation,
            rental_api::presentation::http::valuations::delete_valuation,
            rental_api::presentation::http::investment_companies::list_investment_companies,
            rental_api::presentation::http::investment_companies::get_investment_company,
            rental_api::presentation::http::investment_companies::create_investment_company,
            rental_api::presentation::http::investment_companies::update_investment_company,
            rental_api::presentation::http::investment_companies::delete_investment_company,
            rental_api::presentation::http::notifications::generate_notifications,
            rental_api::presentation::http::notifications::process_notifications,
            rental_api::presentation::http::notifications::list_notifications,
            rental_api::presentation::http::notifications::upcoming_notifications,
            rental_api::presentation::http::notifications::get_notification,
            rental_api::presentation::http::notifications::retry_notification,
            rental_api::presentation::http::notifications::retry_notifications,
            rental_api::presentation::http::notifications::get_settings,
            rental_api::presentation::http::notifications::update_settings,
            rental_api::presentation::http::imports::preview,
            rental_api::presentation::http::imports::run_import,
            rental_api::presentation::http::imports::list_history,
            rental_api::presentation::http::imports::get_history,
            rental_api::presentation::http::imports::rollback,
            rental_api::presentation::http::matching::match_addresses,
            rental_api::presentation::http::dashboard::portfolio_roi,
            rental_api::presentation::http::dashboard::cash_flow,
        ),
        components(schemas(
            rental_api::presentation::http::health::HealthResp,
            rental_api::presentation::http::error::ErrorBody,
            rental_api::presentation::http::accounts::CreateAccountRequest,
            rental_api::presentation::http::notifications::GenerateRequest,
            rental_api::presentation::http::notifications::BulkRetryRequest,
            rental_api::presentation::http::imports::ImportRequest,
            rental_api::presentation::http::matching::MatchRequest,
            rental_api::application::dto::pagination::PageMeta,
            rental_api::application::dto::pagination::PropertyPage,
            rental_api::application::dto::pagination::LeasePage,
            rental_api::application::dto::pagination::OwnerPage,
            rental_api::application::dto::pagination::MortgagePage,
            rental_api::application::dto::pagination::NotificationPage,
            rental_api::application::dto::properties::PropertyListItem,
            rental_api::application::dto::properties::PropertyStatistics,
            rental_api::application::dto::properties::PortfolioSummary,
            rental_api::application::dto::units::UnitView,
            rental_api::application::dto::tenants::TenantDetail,
            rental_api::application::dto::leases::LeaseRecord,
            rental_api::application::dto::leases::ExpiringLease,
            rental_api::application::dto::leases::RefreshResult,
            rental_api::application::dto::owners::OwnerListItem,
            rental_api::application::dto::owners::OwnershipRecord,
            rental_api::application::dto::mortgages::MortgageDetail,
            rental_api::application::dto::financials::FinancialBreakdown,
            rental_api::application::dto::financials::PropertyFinancialDashboard,
            rental_api::application::dto::investment_companies::InvestmentCompanyListItem,
            rental_api::application::dto::investment_companies::InvestmentCompanyDetail,
            rental_api::application::dto::notifications::NotificationRecord,
            rental_api::application::dto::notifications::ProcessResult,
            rental_api::application::dto::notifications::BulkRetryResult,
            rental_api::application::dto::notifications::NotificationSettings,
            rental_api::application::dto::notifications::GenerateResult,
            rental_api::application::dto::imports::ImportPreview,
            rental_api::application::dto::imports::RollbackResult,
            rental_api::application::dto::matching::AddressMatch,
            rental_api::domain::accounts::Account,
            rental_api::domain::accounts::AccountStatus,
            rental_api::domain::bank_accounts::BankAccount,
            rental_api::domain::bank_accounts::BankAccountFields,
            rental_api::domain::bank_accounts::BankAccountPatch,
            rental_api::domain::bank_accounts::BankAccountType,
            rental_api::domain::properties::Property,
            rental_api::domain::properties::PropertyFields,
            rental_api::domain::properties::PropertyPatch,
            rental_api::domain::properties::PropertyType,
            rental_api::domain::properties::PropertyStatus,
            rental_api::domain::plot_info::PlotInfo,
            rental_api::domain::plot_info::PlotInfoFields,
            rental_api::domain::plot_info::PlotInfoPatch,
            rental_api::domain::units::Unit,
            rental_api::domain::units::UnitFields,
            rental_api::domain::units::UnitPatch,
            rental_api::domain::units::UnitType,
            rental_api::domain::units::OccupancyStatus,
            rental_api::domain::tenants::Tenant,
            rental_api::domain::tenants::TenantFields,
            rental_api::domain::tenants::TenantPatch,
            rental_api::domain::leases::Lease,
            rental_api::domain::leases::LeaseFields,
            rental_api::domain::leases::LeasePatch,
            rental_api::domain::leases::LeaseStatus,
            rental_api::domain::owners::Owner,
            rental_api::domain::owners::OwnerFields,
            rental_api::domain::owners::OwnerPatch,
            rental_api::domain::owners::OwnerType,
            rental_api::domain::ownerships::Ownership,
            rental_api::domain::ownerships::OwnershipFields,
            rental_api::domain::ownerships::OwnershipPatch,
            rental_api::domain::ownerships::OwnershipSummary,
            rental_api::domain::ownerships::OwnershipType,
            rental_api::domain::mortgages::Mortgage,
            rental_api::domain::mortgages::MortgageFields,
            rental_api::domain::mortgages::MortgagePatch,
            rental_api::domain::mortgages::MortgagePayment,
            rental_api::domain::mortgages::MortgageSummary,
            rental_api::domain::mortgages::MortgageStatus,
            rental_api::domain::mortgages::PaymentFields,
            rental_api::domain::financials::Expense,
            rental_api::domain::financials::ExpenseFields,
            rental_api::domain::financials::ExpensePatch,
            rental_api::domain::financials::ExpenseType,
            rental_api::domain::financials::Income,
            rental_api::domain::financials::IncomeFields,
            rental_api::domain::financials::IncomePatch,
            rental_api::domain::financials::IncomeType,
            rental_api::domain::financials::FinancialSummary,
            rental_api::domain::financials::TypeBreakdown,
            rental_api::domain::valuations::Valuation,
            rental_api::domain::valuations::ValuationFields,
            rental_api::domain::valuations::ValuationPatch,
            rental_api::domain::valuations::ValuationPoint,
            rental_api::domain::valuations::PortfolioValuationPoint,
            rental_api::domain::valuations::ValuationType,
            rental_api::domain::investment_companies::InvestmentCompany,
            rental_api::domain::investment_companies::InvestmentCompanyFields,
            rental_api::domain::investment_companies::InvestmentCompanyPatch,
            rental_api::domain::notifications::Notification,
            rental_api::domain::notifications::NotificationStatus,
            rental_api::domain::notifications::NotificationType,
            rental_api::domain::imports::ImportRecord,
            rental_api::domain::imports::ImportStatus,
            rental_api::domain::imports::ImportType,
            rental_api::domain::imports::RowError,
            rental_api::domain::dashboard::CashFlowPeriod,
            rental_api::domain::dashboard::PortfolioRoi,
        )),
        tags(
            (name = "Health", description = "System health checks"),
            (name = "Accounts", description = "Tenant accounts"),
            (name = "Bank accounts", description = "Bank accounts paying mortgages"),
            (name = "Properties", description = "Property portfolio"),
            (name = "Plot info", description = "Land registry data per property"),
            (name = "Units", description = "Rentable units"),
            (name = "Tenants", description = "Tenants"),
            (name = "Leases", description = "Leases and their lifecycle"),
            (name = "Owners", description = "Owners"),
            (name = "Ownerships", description = "Property ownership shares"),
            (name = "Mortgages", description = "Mortgages and payments"),
            (name = "Financials", description = "Expense and income ledger"),
            (name = "Valuations", description = "Property valuations"),
            (name = "Investment companies", description = "Investment companies"),
            (name = "Notifications", description = "Lease expiration reminders"),
            (name = "Imports", description = "Bulk imports with history and rollback"),
            (name = "Matching", description = "Address matching"),
            (name = "Dashboard", description = "Portfolio reports")
        )
    )]
struct ApiDoc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            std::env::var("RUST_LOG")
                .unwrap_or_else(|_| "rental_api=debug,axum=info,tower_http=info".into()),
        )
        .init();

    let cfg = Config::from_env()?;
    info!(?cfg, "Starting rental backend");

    // Database
    let pool =
        rental_api::infrastructure::db::connect_pool(&cfg.database_url, cfg.database_max_connections)
            .await?;
    rental_api::infrastructure::db::migrate(&pool).await?;

    let services = AppServices::new(
        Arc::new(SqlxAccountRepository::new(pool.clone())),
        Arc::new(SqlxBankAccountRepository::new(pool.clone())),
        Arc::new(SqlxPropertyRepository::new(pool.clone())),
        Arc::new(SqlxPlotInfoRepository::new(pool.clone())),
        Arc::new(SqlxUnitRepository::new(pool.clone())),
        Arc::new(SqlxTenantRepository::new(pool.clone())),
        Arc::new(SqlxLeaseRepository::new(pool.clone())),
        Arc::new(SqlxOwnerRepository::new(pool.clone())),
        Arc::new(SqlxOwnershipRepository::new(pool.clone())),
        Arc::new(SqlxMortgageRepository::new(pool.clone())),
        Arc::new(SqlxFinancialRepository::new(pool.clone())),
        Arc::new(SqlxValuationRepository::new(pool.clone())),
        Arc::new(SqlxInvestmentCompanyRepository::new(pool.clone())),
        Arc::new(SqlxNotificationRepository::new(pool.clone())),
        Arc::new(LogNotificationSender),
        Arc::new(InMemoryImportHistory::new()),
    );

    let ctx = AppContext::new(cfg.clone(), services);

    // Build CORS
    let methods = [
        http::Method::GET,
        http::Method::POST,
        http::Method::PUT,
        http::Method::DELETE,
        http::Method::PATCH,
        http::Method::OPTIONS,
    ];
    let headers = [
        http::header::CONTENT_TYPE,
        http::header::AUTHORIZATION,
        HeaderName::from_static(ACCOUNT_HEADER),
    ];
    let origin = match cfg.frontend_url.as_deref().map(HeaderValue::from_str) {
        Some(Ok(v)) => AllowOrigin::exact(v),
        Some(Err(e)) if cfg.is_production => {
            return Err(anyhow::anyhow!("FRONTEND_URL is not a valid origin: {e}"));
        }
        // Development convenience
        _ => AllowOrigin::mirror_request(),
    };
    let cors = CorsLayer::new()
        .allow_origin(origin)
        .allow_methods(methods)
        .allow_headers(headers)
        .allow_credentials(true);

    // Build API router
    let api_router = Router::new()
        .nest("/api", routes::health::routes(pool.clone()))
        .nest("/api", routes::accounts::routes(ctx.clone()))
        .nest("/api", routes::bank_accounts::routes(ctx.clone()))
        .nest("/api", routes::properties::routes(ctx.clone()))
        .nest("/api", routes::plot_info::routes(ctx.clone()))
        .nest("/api", routes::units::routes(ctx.clone()))
        .nest("/api", routes::tenants::routes(ctx.clone()))
        .nest("/api", routes::leases::routes(ctx.clone()))
        .nest("/api", routes::owners::routes(ctx.clone()))
        .nest("/api", routes::ownerships::routes(ctx.clone()))
        .nest("/api", routes::mortgages::routes(ctx.clone()))
        .nest("/api", routes::financials::routes(ctx.clone()))
        .nest("/api", routes::valuations::routes(ctx.clone()))
        .nest("/api", routes::investment_companies::routes(ctx.clone()))
        .nest("/api", routes::notifications::routes(ctx.clone()))
        .nest("/api", routes::imports::routes(ctx.clone()))
        .nest("/api", routes::matching::routes(ctx.clone()))
        .nest("/api", routes::dashboard::routes(ctx.clone()))
        .merge(SwaggerUi::new("/api/docs").url("/api/openapi.json", ApiDoc::openapi()))
        .layer(cors)
        .layer(
            TraceLayer::new_for_http().make_span_with(|req: &http::Request<_>| {
                let method = req.method().clone();
                let uri = req.uri().clone();
                let matched = req
                    .extensions()
                    .get::<MatchedPath>()
                    .map(|p| p.as_str().to_string())
                    .unwrap_or_default();
                tracing::info_span!("http", %method, %uri, matched_path = %matched)
            }),
        );

    let api_addr = SocketAddr::from(([0, 0, 0, 0], cfg.api_port));
    info!(%api_addr, "HTTP API listening");
    let listener = tokio::net::TcpListener::bind(api_addr).await?;

    let api_handle: JoinHandle<anyhow::Result<()>> = tokio::spawn(async move {
        axum::serve(listener, api_router)
            .with_graceful_shutdown(shutdown_signal())
            .await?;
        Ok(())
    });

    match api_handle.await {
        Ok(Ok(())) => info!("HTTP API stopped"),
        Ok(Err(e)) => error!(?e, "API server task failed"),
        Err(e) => error!(?e, "API server task panicked"),
    }
    pool.close().await;
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!(?e, "ctrl_c_listener_failed");
    }
    info!("shutdown_requested");
}
