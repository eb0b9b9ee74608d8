// src/routes.rs

use axum::{
    Router,
    middleware as axum_middleware,
    routing::{get, patch, post},
};

use crate::{config::AppState, handlers, middleware::auth::auth_guard};

/// Monta o router completo da aplicação. Cada recurso vive em seu
/// sub-router, protegido pelo middleware de autenticação; só o registro,
/// o login e o health check ficam de fora.
pub fn build_router(app_state: AppState) -> Router {
    // Rotas de autenticação (públicas)
    let auth_routes = Router::new()
        .route("/register", post(handlers::auth::register))
        .route("/login", post(handlers::auth::login))
        .merge(
            Router::new()
                .route("/logout", post(handlers::auth::logout))
                .layer(axum_middleware::from_fn_with_state(
                    app_state.clone(),
                    auth_guard,
                )),
        );

    let user_routes = Router::new()
        .route("/", get(handlers::accounts::list_users))
        .route("/me", get(handlers::auth::get_me))
        .route(
            "/{id}",
            get(handlers::accounts::get_user)
                .put(handlers::accounts::update_user)
                .delete(handlers::accounts::delete_user),
        )
        .layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            auth_guard,
        ));

    let profile_routes = Router::new()
        .route(
            "/",
            get(handlers::accounts::list_profiles).post(handlers::accounts::create_profile),
        )
        .route(
            "/my-profile",
            get(handlers::accounts::my_profile).put(handlers::accounts::update_my_profile),
        )
        .route(
            "/{id}",
            get(handlers::accounts::get_profile)
                .put(handlers::accounts::update_profile)
                .delete(handlers::accounts::delete_profile),
        )
        .layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            auth_guard,
        ));

    let role_routes = Router::new()
        .route("/", get(handlers::accounts::list_roles))
        .route("/my-role", get(handlers::accounts::my_role))
        .route(
            "/{id}",
            get(handlers::accounts::get_role).put(handlers::accounts::update_role),
        )
        .layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            auth_guard,
        ));

    let landlord_routes = Router::new()
        .route(
            "/",
            get(handlers::landlords::list_landlords).post(handlers::landlords::create_landlord),
        )
        .route(
            "/my-landlord-profile",
            get(handlers::landlords::my_landlord_profile),
        )
        .route(
            "/{id}",
            get(handlers::landlords::get_landlord)
                .put(handlers::landlords::update_landlord)
                .delete(handlers::landlords::delete_landlord),
        )
        .layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            auth_guard,
        ));

    let tenant_routes = Router::new()
        .route(
            "/",
            get(handlers::tenants::list_tenants).post(handlers::tenants::create_tenant),
        )
        .route(
            "/my-tenant-profile",
            get(handlers::tenants::my_tenant_profile),
        )
        .route(
            "/{id}",
            get(handlers::tenants::get_tenant)
                .put(handlers::tenants::update_tenant)
                .delete(handlers::tenants::delete_tenant),
        )
        .layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            auth_guard,
        ));

    let apartment_type_routes = Router::new()
        .route(
            "/",
            get(handlers::properties::list_apartment_types)
                .post(handlers::properties::create_apartment_type),
        )
        .route(
            "/{id}",
            get(handlers::properties::get_apartment_type)
                .put(handlers::properties::update_apartment_type)
                .delete(handlers::properties::delete_apartment_type),
        )
        .layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            auth_guard,
        ));

    let house_type_routes = Router::new()
        .route(
            "/",
            get(handlers::properties::list_house_types)
                .post(handlers::properties::create_house_type),
        )
        .route(
            "/{id}",
            get(handlers::properties::get_house_type)
                .put(handlers::properties::update_house_type)
                .delete(handlers::properties::delete_house_type),
        )
        .layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            auth_guard,
        ));

    let apartment_routes = Router::new()
        .route(
            "/",
            get(handlers::properties::list_apartments).post(handlers::properties::create_apartment),
        )
        .route(
            "/{id}",
            get(handlers::properties::get_apartment)
                .put(handlers::properties::update_apartment)
                .delete(handlers::properties::delete_apartment),
        )
        .route("/{id}/houses", get(handlers::properties::houses_of_apartment))
        .layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            auth_guard,
        ));

    let house_routes = Router::new()
        .route(
            "/",
            get(handlers::houses::list_houses).post(handlers::houses::create_house),
        )
        .route("/vacant", get(handlers::houses::list_vacant_houses))
        .route(
            "/{id}",
            get(handlers::houses::get_house)
                .put(handlers::houses::update_house)
                .delete(handlers::houses::delete_house),
        )
        .route("/{id}/assign-tenant", post(handlers::houses::assign_tenant))
        .route("/{id}/vacate", post(handlers::houses::vacate_house))
        .layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            auth_guard,
        ));

    let booking_routes = Router::new()
        .route(
            "/",
            get(handlers::bookings::list_bookings).post(handlers::bookings::create_booking),
        )
        .route(
            "/{id}",
            get(handlers::bookings::get_booking)
                .put(handlers::bookings::update_booking)
                .delete(handlers::bookings::delete_booking),
        )
        .route("/{id}/status", patch(handlers::bookings::update_booking_status))
        .layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            auth_guard,
        ));

    let invoice_routes = Router::new()
        .route(
            "/",
            get(handlers::billing::list_invoices).post(handlers::billing::create_invoice),
        )
        .route("/my-invoices", get(handlers::billing::my_invoices))
        .route("/unpaid", get(handlers::billing::unpaid_invoices))
        .route(
            "/{id}",
            get(handlers::billing::get_invoice)
                .put(handlers::billing::update_invoice)
                .delete(handlers::billing::delete_invoice),
        )
        .layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            auth_guard,
        ));

    let payment_routes = Router::new()
        .route(
            "/",
            get(handlers::billing::list_payments).post(handlers::billing::create_payment),
        )
        .route("/my-payments", get(handlers::billing::my_payments))
        .route(
            "/{id}",
            get(handlers::billing::get_payment)
                .put(handlers::billing::update_payment)
                .delete(handlers::billing::delete_payment),
        )
        .layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            auth_guard,
        ));

    let dashboard_routes = Router::new()
        .route("/stats", get(handlers::dashboard::dashboard_stats))
        .layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            auth_guard,
        ));

    // Combina tudo no router principal
    Router::new()
        .route("/api/health", get(|| async { "OK" }))
        .nest("/api/auth", auth_routes)
        .nest("/api/users", user_routes)
        .nest("/api/profiles", profile_routes)
        .nest("/api/roles", role_routes)
        .nest("/api/landlords", landlord_routes)
        .nest("/api/tenants", tenant_routes)
        .nest("/api/apartment-types", apartment_type_routes)
        .nest("/api/house-types", house_type_routes)
        .nest("/api/apartments", apartment_routes)
        .nest("/api/houses", house_routes)
        .nest("/api/bookings", booking_routes)
        .nest("/api/invoices", invoice_routes)
        .nest("/api/payments", payment_routes)
        .nest("/api/dashboard", dashboard_routes)
        .with_state(app_state)
}
