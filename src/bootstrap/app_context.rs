use std::sync::Arc;

use crate::application::ports::account_repository::AccountRepository;
use crate::application::ports::bank_account_repository::BankAccountRepository;
use crate::application::ports::financial_repository::FinancialRepository;
use crate::application::ports::import_history_store::ImportHistoryStore;
use crate::application::ports::investment_company_repository::InvestmentCompanyRepository;
use crate::application::ports::lease_repository::LeaseRepository;
use crate::application::ports::mortgage_repository::MortgageRepository;
use crate::application::ports::notification_repository::NotificationRepository;
use crate::application::ports::notification_sender::NotificationSender;
use crate::application::ports::owner_repository::OwnerRepository;
use crate::application::ports::ownership_repository::OwnershipRepository;
use crate::application::ports::plot_info_repository::PlotInfoRepository;
use crate::application::ports::property_repository::PropertyRepository;
use crate::application::ports::tenant_repository::TenantRepository;
use crate::application::ports::unit_repository::UnitRepository;
use crate::application::ports::valuation_repository::ValuationRepository;
use crate::bootstrap::config::Config;

#[derive(Clone)]
pub struct AppContext {
    pub cfg: Config,
    services: Arc<AppServices>,
}

#[derive(Clone)]
pub struct AppServices {
    account_repo: Arc<dyn AccountRepository>,
    bank_account_repo: Arc<dyn BankAccountRepository>,
    property_repo: Arc<dyn PropertyRepository>,
    plot_info_repo: Arc<dyn PlotInfoRepository>,
    unit_repo: Arc<dyn UnitRepository>,
    tenant_repo: Arc<dyn TenantRepository>,
    lease_repo: Arc<dyn LeaseRepository>,
    owner_repo: Arc<dyn OwnerRepository>,
    ownership_repo: Arc<dyn OwnershipRepository>,
    mortgage_repo: Arc<dyn MortgageRepository>,
    financial_repo: Arc<dyn FinancialRepository>,
    valuation_repo: Arc<dyn ValuationRepository>,
    investment_company_repo: Arc<dyn InvestmentCompanyRepository>,
    notification_repo: Arc<dyn NotificationRepository>,
    notification_sender: Arc<dyn NotificationSender>,
    import_history: Arc<dyn ImportHistoryStore>,
}

impl AppServices {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        account_repo: Arc<dyn AccountRepository>,
        bank_account_repo: Arc<dyn BankAccountRepository>,
        property_repo: Arc<dyn PropertyRepository>,
        plot_info_repo: Arc<dyn PlotInfoRepository>,
        unit_repo: Arc<dyn UnitRepository>,
        tenant_repo: Arc<dyn TenantRepository>,
        lease_repo: Arc<dyn LeaseRepository>,
        owner_repo: Arc<dyn OwnerRepository>,
        ownership_repo: Arc<dyn OwnershipRepository>,
        mortgage_repo: Arc<dyn MortgageRepository>,
        financial_repo: Arc<dyn FinancialRepository>,
        valuation_repo: Arc<dyn ValuationRepository>,
        investment_company_repo: Arc<dyn InvestmentCompanyRepository>,
        notification_repo: Arc<dyn NotificationRepository>,
        notification_sender: Arc<dyn NotificationSender>,
        import_history: Arc<dyn ImportHistoryStore>,
    ) -> Self {
        Self {
            account_repo,
            bank_account_repo,
            property_repo,
            plot_info_repo,
            unit_repo,
            tenant_repo,
            lease_repo,
            owner_repo,
            ownership_repo,
            mortgage_repo,
            financial_repo,
            valuation_repo,
            investment_company_repo,
            notification_repo,
            notification_sender,
            import_history,
        }
    }
}

impl AppContext {
    pub fn new(cfg: Config, services: AppServices) -> Self {
        Self {
            cfg,
            services: Arc::new(services),
        }
    }

    pub fn account_repo(&self) -> Arc<dyn AccountRepository> {
        self.services.account_repo.clone()
    }

    pub fn bank_account_repo(&self) -> Arc<dyn BankAccountRepository> {
        self.services.bank_account_repo.clone()
    }

    pub fn property_repo(&self) -> Arc<dyn PropertyRepository> {
        self.services.property_repo.clone()
    }

    pub fn plot_info_repo(&self) -> Arc<dyn PlotInfoRepository> {
        self.services.plot_info_repo.clone()
    }

    pub fn unit_repo(&self) -> Arc<dyn UnitRepository> {
        self.services.unit_repo.clone()
    }

    pub fn tenant_repo(&self) -> Arc<dyn TenantRepository> {
        self.services.tenant_repo.clone()
    }

    pub fn lease_repo(&self) -> Arc<dyn LeaseRepository> {
        self.services.lease_repo.clone()
    }

    pub fn owner_repo(&self) -> Arc<dyn OwnerRepository> {
        self.services.owner_repo.clone()
    }

    pub fn ownership_repo(&self) -> Arc<dyn OwnershipRepository> {
        self.services.ownership_repo.clone()
    }

    pub fn mortgage_repo(&self) -> Arc<dyn MortgageRepository> {
        self.services.mortgage_repo.clone()
    }

    pub fn financial_repo(&self) -> Arc<dyn FinancialRepository> {
        self.services.financial_repo.clone()
    }

    pub fn valuation_repo(&self) -> Arc<dyn ValuationRepository> {
        self.services.valuation_repo.clone()
    }

    pub fn investment_company_repo(&self) -> Arc<dyn InvestmentCompanyRepository> {
        self.services.investment_company_repo.clone()
    }

    pub fn notification_repo(&self) -> Arc<dyn NotificationRepository> {
        self.services.notification_repo.clone()
    }

    pub fn notification_sender(&self) -> Arc<dyn NotificationSender> {
        self.services.notification_sender.clone()
    }

    pub fn import_history(&self) -> Arc<dyn ImportHistoryStore> {
        self.services.import_history.clone()
    }
}
