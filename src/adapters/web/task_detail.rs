use super::auth::{MaybeSession, RequireSession};
use super::dto::{CommentDto, CreateCommentRequest};
use super::render::{escape_html, escape_js_string, page};
use super::{ApiError, AppState};
use crate::domain::{Comment, SessionUser, Task};
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Redirect};
use axum::Json;
use std::fmt::Write;

/// Client half of the detail page. There is no live subscription here:
/// the comment list is a request-time snapshot, appended to with the
/// record returned by the create endpoint and pruned on delete.
const TASK_DETAIL_JS: &str = r#"
const commentList = document.getElementById('comment-list');

function removeEmptyMarker() {
    const marker = document.getElementById('no-comments');
    if (marker) marker.remove();
}

function deleteButton() {
    const del = document.createElement('button');
    del.className = 'icon';
    del.dataset.delete = '1';
    del.title = 'Delete comment';
    del.textContent = '\u{1F5D1}';
    return del;
}

function commentNode(c) {
    const article = document.createElement('article');
    article.className = 'comment';
    article.dataset.id = c.id;
    const head = document.createElement('div');
    head.className = 'row';
    const name = document.createElement('span');
    name.className = 'tag';
    name.textContent = c.author_name;
    const when = document.createElement('span');
    when.textContent = ' Just now';
    const byline = document.createElement('span');
    byline.append(name, when);
    head.append(byline, deleteButton());
    const text = document.createElement('p');
    text.textContent = c.text;
    article.append(head, text);
    return article;
}

commentList.addEventListener('click', async (event) => {
    const button = event.target.closest('button[data-delete]');
    if (!button) return;
    const article = button.closest('article');
    try {
        const resp = await fetch('/api/comments/' + article.dataset.id, { method: 'DELETE' });
        if (resp.ok) article.remove();
    } catch (err) {
        console.log('failed to delete comment', err);
    }
});

const form = document.getElementById('comment-form');
const input = document.getElementById('comment-text');
form.addEventListener('submit', async (event) => {
    event.preventDefault();
    if (!SIGNED_IN) return;
    if (input.value.trim() === '') return;
    try {
        const resp = await fetch('/api/tasks/' + TASK_ID + '/comments', {
            method: 'POST',
            headers: { 'Content-Type': 'application/json' },
            body: JSON.stringify({ text: input.value }),
        });
        if (resp.status === 201) {
            removeEmptyMarker();
            commentList.append(commentNode(await resp.json()));
            input.value = '';
        }
    } catch (err) {
        console.log('failed to send comment', err);
    }
});
"#;

fn comment_html(comment: &Comment, viewer_email: Option<&str>) -> String {
    // The delete button renders only for the comment's author; the
    // endpoint enforces the same rule for callers that skip the UI.
    let delete_button = if viewer_email == Some(comment.author_email.as_str()) {
        "<button class=\"icon\" data-delete=\"1\" title=\"Delete comment\">\u{1F5D1}</button>"
    } else {
        ""
    };
    format!(
        "<article class=\"comment\" data-id=\"{id}\">\
         <div class=\"row\"><span><span class=\"tag\">{name}</span> {when}</span>{delete_button}</div>\
         <p>{text}</p></article>",
        id = escape_html(&comment.id.0),
        name = escape_html(&comment.author_name),
        when = escape_html(&comment.time_since_created()),
        text = escape_html(&comment.text),
    )
}

fn detail_page_body(task: &Task, comments: &[Comment], viewer: Option<&SessionUser>) -> String {
    let viewer_email = viewer.map(|user| user.email.as_str());
    let mut comment_list = String::new();
    if comments.is_empty() {
        comment_list.push_str("<span id=\"no-comments\">No comments found...</span>");
    }
    for comment in comments {
        // Writing to a String cannot fail.
        let _ = write!(comment_list, "{}", comment_html(comment, viewer_email));
    }

    // Submitting is disabled, not hidden, for signed-out visitors.
    let submit_disabled = if viewer.is_some() { "" } else { " disabled" };
    format!(
        "<h1>Task</h1>\
         <article class=\"task\"><p>{text}</p></article>\
         <section><h2>Leave a comment</h2>\
         <form id=\"comment-form\">\
         <textarea id=\"comment-text\" placeholder=\"Type your comment\"></textarea>\
         <button type=\"submit\" class=\"submit\"{submit_disabled}>Send comment</button>\
         </form></section>\
         <section><h2>All comments</h2><div id=\"comment-list\">{comment_list}</div></section>\
         <script>const TASK_ID = '{task_id}'; const SIGNED_IN = {signed_in};</script>\
         <script>{script}</script>",
        text = escape_html(&task.text),
        task_id = escape_js_string(&task.id.0),
        signed_in = viewer.is_some(),
        script = TASK_DETAIL_JS,
    )
}

/// One-shot server-side fetch: the task and its comments are read once at
/// request time. An absent task and a private one are indistinguishable
/// to the visitor; both redirect home.
pub async fn task_detail_page(
    MaybeSession(viewer): MaybeSession,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Html<String>, Redirect> {
    let task_id = id.as_str().into();
    let task = state
        .tasks
        .public_task(&task_id)
        .await
        .map_err(|e| {
            tracing::error!(error = %e, task_id = %task_id, "failed to fetch task");
            Redirect::temporary("/")
        })?
        .ok_or_else(|| Redirect::temporary("/"))?;

    let comments = state
        .comments
        .comments_for_task(&task_id)
        .await
        .map_err(|e| {
            tracing::error!(error = %e, task_id = %task_id, "failed to fetch comments");
            Redirect::temporary("/")
        })?;

    let body = detail_page_body(&task, &comments, viewer.as_ref());
    Ok(Html(page("Task details", &body)))
}

pub async fn create_comment(
    RequireSession(user): RequireSession,
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(request): Json<CreateCommentRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let comment = state
        .comments
        .post_comment(&id.as_str().into(), &request.text, &user)
        .await?;
    Ok((StatusCode::CREATED, Json(CommentDto::from(comment))))
}

pub async fn delete_comment(
    RequireSession(user): RequireSession,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    state
        .comments
        .delete_comment(&id.as_str().into(), &user.email)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}
