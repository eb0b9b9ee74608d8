pub mod account_repo;
pub mod billing_repo;
pub mod booking_repo;
pub mod dashboard_repo;
pub mod landlord_repo;
pub mod property_repo;
pub mod tenant_repo;
pub mod user_repo;

pub use account_repo::AccountRepository;
pub use billing_repo::BillingRepository;
pub use booking_repo::BookingRepository;
pub use dashboard_repo::DashboardRepository;
pub use landlord_repo::LandlordRepository;
pub use property_repo::PropertyRepository;
pub use tenant_repo::TenantRepository;
pub use user_repo::UserRepository;
