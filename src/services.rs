pub mod account_service;
pub mod auth;
pub mod billing_service;
pub mod booking_service;
pub mod dashboard_service;
pub mod landlord_service;
pub mod property_service;
pub mod tenant_service;

pub use account_service::AccountService;
pub use auth::AuthService;
pub use billing_service::BillingService;
pub use booking_service::BookingService;
pub use dashboard_service::DashboardService;
pub use landlord_service::LandlordService;
pub use property_service::PropertyService;
pub use tenant_service::TenantService;
