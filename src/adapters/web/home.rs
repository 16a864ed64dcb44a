use super::auth::MaybeSession;
use super::render::{escape_html, page};
use axum::response::Html;

/// Landing page and redirect target for everything session-gated. Shows
/// the sign-in form to visitors and a link to the dashboard otherwise.
pub async fn home_page(MaybeSession(viewer): MaybeSession) -> Html<String> {
    let body = match viewer {
        Some(user) => format!(
            "<h1>Organize your tasks easily</h1>\
             <p>Signed in as {name}</p>\
             <p><a href=\"/dashboard\">Go to my task panel</a></p>\
             <form action=\"/logout\" method=\"post\"><button class=\"submit\">Sign out</button></form>",
            name = escape_html(&user.name),
        ),
        None => "<h1>Organize your tasks easily</h1>\
             <p>Sign in to create tasks and comment on shared ones.</p>\
             <form action=\"/login\" method=\"post\">\
             <p><input name=\"email\" type=\"email\" placeholder=\"Email\" required></p>\
             <p><input name=\"name\" type=\"text\" placeholder=\"Display name\" required></p>\
             <button type=\"submit\" class=\"submit\">Sign in</button>\
             </form>"
            .to_string(),
    };
    Html(page("Tasks+ | Organize your tasks easily", &body))
}
