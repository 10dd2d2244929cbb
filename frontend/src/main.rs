mod api;
mod components;
mod preview;
mod store;

use components::create_character::CreateCharacter;
use components::home::Home;
use components::nav::NavBar;
use components::toaster::Toaster;
use store::{State, StoreContext, View};
use yew::prelude::*;

#[function_component(App)]
fn app() -> Html {
    let store = use_reducer(State::default);

    html! {
        <ContextProvider<StoreContext> context={store.clone()}>
            <div class="app-container">
                <NavBar />
                <main class="main-stage">
                    {match store.view {
                        View::Create => html! { <CreateCharacter /> },
                        View::Home => html! { <Home /> },
                    }}
                </main>
                <Toaster />
            </div>
        </ContextProvider<StoreContext>>
    }
}

fn main() {
    yew::Renderer::<App>::new().render();
}
