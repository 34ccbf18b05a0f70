//! Landing page linking the three checkout flows.

use yew::prelude::*;
use yew_router::prelude::*;

use crate::app::Route;
use crate::pages::use_document_title;

#[function_component(HomePage)]
pub fn home_page() -> Html {
    use_document_title("Stripe .:. Payment Client");

    let link_class = "rounded w-full p-2 mb-2 bg-slate-500 text-center";

    html! {
        <div class="mx-auto p-2 space-x-2 flex items-center justify-center px-[100px] h-screen">
            <Link<Route> to={Route::Cart} classes={classes!(link_class)}>
                { "By Cart" }
            </Link<Route>>
            <Link<Route> to={Route::Transaction} classes={classes!(link_class)}>
                { "By Transaction" }
            </Link<Route>>
            <Link<Route> to={Route::Secret} classes={classes!(link_class)}>
                { "By Stripe Secret" }
            </Link<Route>>
        </div>
    }
}
