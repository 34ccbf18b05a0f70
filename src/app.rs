//! Root component: route table plus the configuration context every page and
//! panel reads from.

use yew::prelude::*;
use yew_router::prelude::*;

use crate::config::AppConfig;
use crate::pages::{CartPage, HomePage, SecretPage, TransactionPage};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Routable)]
pub enum Route {
    #[at("/")]
    Home,
    #[at("/payment/cart")]
    Cart,
    #[at("/payment/transaction")]
    Transaction,
    #[at("/payment/secret")]
    Secret,
    #[not_found]
    #[at("/404")]
    NotFound,
}

fn switch(route: Route) -> Html {
    match route {
        Route::Home => html! { <HomePage /> },
        Route::Cart => html! { <CartPage /> },
        Route::Transaction => html! { <TransactionPage /> },
        Route::Secret => html! { <SecretPage /> },
        Route::NotFound => html! { <p>{ "Page not found" }</p> },
    }
}

#[function_component(App)]
pub fn app() -> Html {
    let config = use_memo((), |_| AppConfig::from_env());

    html! {
        <ContextProvider<AppConfig> context={(*config).clone()}>
            <BrowserRouter>
                <Switch<Route> render={switch} />
            </BrowserRouter>
        </ContextProvider<AppConfig>>
    }
}
