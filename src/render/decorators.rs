use std::sync::Arc;

use serde_json::Value;

use super::{Panel, View, ViewProps};

/// Turns widget props into a view.
pub type ViewFactory<P> = Arc<dyn Fn(P) -> View + Send + Sync>;

pub fn view_factory<P, F>(build: F) -> ViewFactory<P>
where
    F: Fn(P) -> View + Send + Sync + 'static,
{
    Arc::new(build)
}

/// Frame the inner view with the rendered `header` and `footer` templates.
///
/// Empty or missing templates leave that side of the frame out.
pub fn header_footer<P>(inner: ViewFactory<P>) -> ViewFactory<P>
where
    P: ViewProps + 'static,
{
    Arc::new(move |props: P| {
        let templates = props.template_props();
        let header = non_empty(templates.render("header", &Value::Null));
        let footer = non_empty(templates.render("footer", &Value::Null));
        View::Panel(Panel {
            header,
            body: Box::new(inner(props)),
            footer,
        })
    })
}

/// Replace the inner view with [`View::Hidden`] whenever the props ask for it.
pub fn auto_hide_container<P>(inner: ViewFactory<P>) -> ViewFactory<P>
where
    P: ViewProps + 'static,
{
    Arc::new(move |props: P| {
        if props.should_auto_hide_container() {
            View::Hidden
        } else {
            inner(props)
        }
    })
}

fn non_empty(rendered: Option<String>) -> Option<String> {
    rendered.filter(|text| !text.is_empty())
}
