//! HTTP API server for the storefront services.
//!
//! The transport boundary: routes decode JSON bodies into typed requests,
//! hand them to the dispatcher, and every outcome — success, fault, or
//! panic — leaves through the buffered envelope middleware as one uniform
//! wire structure, with structured logging (tracing) and Prometheus metrics.

pub mod config;
pub mod envelope;
pub mod error;
pub mod middleware;
pub mod routes;

use std::sync::Arc;

use axum::routing::{delete, get, post, put};
use axum::Router;
use domain::order::{
    CreateOrder, CreateOrderHandler, CreateOrderValidator, DeleteOrder, DeleteOrderHandler,
    DeleteOrderValidator, GetOrdersByCustomer, GetOrdersByCustomerHandler, OrderCreated,
    OrderCreatedEventHandler, OrderUpdated, OrderUpdatedEventHandler, UpdateOrder,
    UpdateOrderHandler, UpdateOrderValidator,
};
use domain::product::{
    CreateProduct, CreateProductHandler, CreateProductValidator, DeleteProduct,
    DeleteProductHandler, DeleteProductValidator, GetProductById, GetProductByIdHandler,
    GetProducts, GetProductsByCategory, GetProductsByCategoryHandler, GetProductsHandler,
    UpdateProduct, UpdateProductHandler, UpdateProductValidator,
};
use domain::{
    FeatureToggles, InMemoryMessageBus, Session, StaticToggles, ORDER_FULFILLMENT,
};
use mediator::{
    Dispatcher, EventPublisher, LoggingBehavior, RegistryError, ValidationBehavior,
    ValidatorRegistry,
};
use metrics_exporter_prometheus::PrometheusHandle;
use store::DocumentStore;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

/// Shared application state accessible from all handlers.
pub struct AppState {
    pub dispatcher: Dispatcher,
}

/// Builds the dispatcher with every request kind the routes dispatch.
///
/// Behavior order is fixed here and uniform across request kinds: logging,
/// then validation, then the handler.
pub fn build_dispatcher<S>(session: Arc<Session<S>>) -> Result<Dispatcher, RegistryError>
where
    S: DocumentStore + 'static,
{
    let validators = Arc::new(
        ValidatorRegistry::builder()
            .register::<CreateProduct, _>(CreateProductValidator)
            .register::<UpdateProduct, _>(UpdateProductValidator)
            .register::<DeleteProduct, _>(DeleteProductValidator)
            .register::<CreateOrder, _>(CreateOrderValidator)
            .register::<UpdateOrder, _>(UpdateOrderValidator)
            .register::<DeleteOrder, _>(DeleteOrderValidator)
            .build(),
    );

    Dispatcher::builder()
        .behavior(LoggingBehavior)
        .behavior(ValidationBehavior::new(validators))
        .register::<CreateProduct, _>(CreateProductHandler::new(session.clone()))
        .register::<GetProductById, _>(GetProductByIdHandler::new(session.clone()))
        .register::<GetProducts, _>(GetProductsHandler::new(session.clone()))
        .register::<GetProductsByCategory, _>(GetProductsByCategoryHandler::new(session.clone()))
        .register::<UpdateProduct, _>(UpdateProductHandler::new(session.clone()))
        .register::<DeleteProduct, _>(DeleteProductHandler::new(session.clone()))
        .register::<CreateOrder, _>(CreateOrderHandler::new(session.clone()))
        .register::<UpdateOrder, _>(UpdateOrderHandler::new(session.clone()))
        .register::<DeleteOrder, _>(DeleteOrderHandler::new(session.clone()))
        .register::<GetOrdersByCustomer, _>(GetOrdersByCustomerHandler::new(session))
        .build()
}

/// Creates the default application state with an event publisher, commit
/// session, and fully registered dispatcher.
///
/// Returns the in-memory message bus alongside the state so tests can
/// observe outward publications.
pub fn create_default_state<S>(
    store: S,
    fulfillment_enabled: bool,
) -> Result<(Arc<AppState>, Arc<InMemoryMessageBus>), RegistryError>
where
    S: DocumentStore + 'static,
{
    let bus = Arc::new(InMemoryMessageBus::new());
    let toggles: Arc<dyn FeatureToggles> = Arc::new(StaticToggles::from_flags([(
        ORDER_FULFILLMENT,
        fulfillment_enabled,
    )]));

    let publisher = EventPublisher::builder()
        .subscribe::<OrderCreated, _>(OrderCreatedEventHandler::new(bus.clone(), toggles))
        .subscribe::<OrderUpdated, _>(OrderUpdatedEventHandler)
        .build();

    let session = Arc::new(Session::new(store, Arc::new(publisher)));
    let dispatcher = build_dispatcher(session)?;

    Ok((Arc::new(AppState { dispatcher }), bus))
}

/// Creates the Axum application router with all routes and shared state.
pub fn create_app(state: Arc<AppState>, metrics_handle: PrometheusHandle) -> Router {
    let metrics_router = Router::new()
        .route("/metrics", get(routes::metrics::get))
        .with_state(metrics_handle);

    // Business routes go through the buffered envelope boundary; panics are
    // contained first so the middleware sees them as bare 500s.
    let business = Router::new()
        .route("/products", post(routes::products::create))
        .route("/products", get(routes::products::list))
        .route("/products", put(routes::products::update))
        .route("/products/{id}", get(routes::products::get_by_id))
        .route("/products/{id}", delete(routes::products::remove))
        .route(
            "/products/category/{category}",
            get(routes::products::by_category),
        )
        .route("/orders", post(routes::orders::create))
        .route("/orders", put(routes::orders::update))
        .route("/orders/{id}", delete(routes::orders::remove))
        .route(
            "/orders/customer/{customer_id}",
            get(routes::orders::by_customer),
        )
        .with_state(state)
        .layer(CatchPanicLayer::new())
        .layer(axum::middleware::from_fn(middleware::wrap_envelope));

    Router::new()
        .route("/health", get(routes::health::check))
        .merge(business)
        .merge(metrics_router)
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http())
}

#[cfg(test)]
mod tests {
    use store::InMemoryDocumentStore;

    use super::*;

    #[test]
    fn every_routed_request_kind_has_a_handler() {
        let (state, _bus) =
            create_default_state(InMemoryDocumentStore::new(), false).unwrap();
        let dispatcher = &state.dispatcher;

        assert!(dispatcher.is_registered::<CreateProduct>());
        assert!(dispatcher.is_registered::<GetProductById>());
        assert!(dispatcher.is_registered::<GetProducts>());
        assert!(dispatcher.is_registered::<GetProductsByCategory>());
        assert!(dispatcher.is_registered::<UpdateProduct>());
        assert!(dispatcher.is_registered::<DeleteProduct>());
        assert!(dispatcher.is_registered::<CreateOrder>());
        assert!(dispatcher.is_registered::<UpdateOrder>());
        assert!(dispatcher.is_registered::<DeleteOrder>());
        assert!(dispatcher.is_registered::<GetOrdersByCustomer>());
        assert_eq!(dispatcher.handler_count(), 10);
    }
}
