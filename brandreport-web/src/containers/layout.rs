use crate::{config::FrontendConfig, containers::header::Header, session::SessionHandle};
use web_sys::window;
use yew::{Children, Html, Properties, classes, function_component, html, use_effect_with};

#[derive(Properties, PartialEq)]
pub struct LayoutProps {
    pub session: SessionHandle,
    pub children: Children,
}

#[function_component(Layout)]
pub fn layout(props: &LayoutProps) -> Html {
    // Adds data-theme attribute to html tag for theme support
    use_effect_with((), |_| {
        if let Some(root) = window()
            .and_then(|window| window.document())
            .and_then(|document| document.document_element())
        {
            if let Err(err) = root.set_attribute("data-theme", "light") {
                tracing::debug!(?err, "could not set theme attribute");
            }
        }
        || {}
    });
    let config = FrontendConfig::new();

    html! {
    <>
        <Header session={props.session.clone()} />
        <div class="min-h-screen bg-base-100 flex flex-col">
            <main class={classes!(
                "flex-grow",
                "container",
                "mx-auto",
                "p-4",
                "transition-all",
                "duration-300"
            )}>
                {props.children.clone()}
            </main>
            <footer class="footer footer-center p-4 border-t border-base-300 text-base-content">
                <div>
                    <p>{ format!("© 2025 {}", config.app_name()) }</p>
                </div>
            </footer>
        </div>
    </>
    }
}
