//! App Router

use salvo::Router;

use crate::shares;

pub(crate) fn app_router() -> Router {
    Router::with_path("api").push(
        Router::with_path("shared-cart")
            .post(shares::create::handler)
            .push(Router::with_path("{code}").get(shares::get::handler)),
    )
}
