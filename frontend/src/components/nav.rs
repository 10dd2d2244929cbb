use crate::store::{Action, StoreContext, View};
use yew::prelude::*;

#[function_component(NavBar)]
pub fn nav_bar() -> Html {
    let store = use_context::<StoreContext>().expect("Store context not found");

    let go = |view: View| {
        let store = store.clone();
        Callback::from(move |_: MouseEvent| store.dispatch(Action::Navigate(view)))
    };

    let class_for = |view: View| {
        if store.view == view {
            "nav-btn active"
        } else {
            "nav-btn"
        }
    };

    html! {
        <nav class="navbar">
            <div class="navbar-left">
                <span class="app-title">{"Smart Murti"}</span>
                <button class={class_for(View::Home)} onclick={go(View::Home)}>{"My Characters"}</button>
            </div>
            <div class="navbar-right">
                <button class={class_for(View::Create)} onclick={go(View::Create)}>{"Create"}</button>
            </div>
        </nav>
    }
}
