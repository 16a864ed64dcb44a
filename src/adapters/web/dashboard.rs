use super::auth::RequireSession;
use super::dto::{CreateTaskRequest, TaskDto};
use super::render::{escape_html, escape_js_string, page};
use super::{ApiError, AppState};
use crate::domain::SessionUser;
use axum::extract::ws::{Message, WebSocket, WebSocketUpgrade};
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use axum::Json;

/// Client half of the dashboard: renders snapshots pushed over the
/// WebSocket, submits the creation form, copies share links. The list is
/// replaced wholesale on every snapshot; create and delete do not touch
/// it locally.
const DASHBOARD_JS: &str = r#"
const list = document.getElementById('task-list');

function taskNode(t) {
    const article = document.createElement('article');
    article.className = 'task';
    if (t.public) {
        const head = document.createElement('div');
        head.className = 'row';
        const tag = document.createElement('span');
        tag.className = 'tag';
        tag.textContent = 'Public';
        const share = document.createElement('button');
        share.className = 'icon';
        share.title = 'Copy share link';
        share.textContent = '\u{1F517}';
        share.addEventListener('click', async () => {
            try {
                await navigator.clipboard.writeText(BASE_URL + t.share_path);
            } catch (err) {
                console.log('failed to copy share link', err);
            }
        });
        head.append(tag, share);
        article.append(head);
    }
    const row = document.createElement('div');
    row.className = 'row';
    let text;
    if (t.public) {
        text = document.createElement('a');
        text.href = t.share_path;
    } else {
        text = document.createElement('p');
    }
    text.textContent = t.text;
    const del = document.createElement('button');
    del.className = 'icon';
    del.title = 'Delete task';
    del.textContent = '\u{1F5D1}';
    del.addEventListener('click', () => {
        // No local update: the live query re-fires once the store applies it.
        fetch('/api/tasks/' + t.id, { method: 'DELETE' }).catch((err) => {
            console.log('failed to delete task', err);
        });
    });
    row.append(text, del);
    article.append(row);
    return article;
}

const proto = location.protocol === 'https:' ? 'wss' : 'ws';
const socket = new WebSocket(proto + '://' + location.host + '/dashboard/ws');
socket.addEventListener('message', (event) => {
    const tasks = JSON.parse(event.data);
    list.replaceChildren(...tasks.map(taskNode));
});

const form = document.getElementById('task-form');
const input = document.getElementById('task-text');
const publicBox = document.getElementById('task-public');
form.addEventListener('submit', async (event) => {
    event.preventDefault();
    if (input.value.trim() === '') return;
    try {
        const resp = await fetch('/api/tasks', {
            method: 'POST',
            headers: { 'Content-Type': 'application/json' },
            body: JSON.stringify({ text: input.value, public: publicBox.checked }),
        });
        if (resp.status === 201) {
            input.value = '';
            publicBox.checked = false;
        }
    } catch (err) {
        // Input is retained so nothing typed is lost.
        console.log('failed to register task', err);
    }
});
"#;

pub async fn dashboard_page(
    RequireSession(user): RequireSession,
    State(state): State<AppState>,
) -> Html<String> {
    let body = format!(
        "<header class=\"row\"><span>{email}</span>\
         <form action=\"/logout\" method=\"post\"><button class=\"submit\">Sign out</button></form></header>\
         <h1>What is your task?</h1>\
         <form id=\"task-form\">\
         <textarea id=\"task-text\" placeholder=\"Type your task\"></textarea>\
         <div><label><input type=\"checkbox\" id=\"task-public\"> Make task public</label></div>\
         <button type=\"submit\" class=\"submit\">Register</button>\
         </form>\
         <section><h1>My tasks</h1><div id=\"task-list\"></div></section>\
         <script>const BASE_URL = '{base_url}';</script><script>{script}</script>",
        email = escape_html(&user.email),
        base_url = escape_js_string(&state.base_url),
        script = DASHBOARD_JS,
    );
    Html(page("My task panel", &body))
}

pub async fn dashboard_ws(
    RequireSession(user): RequireSession,
    State(state): State<AppState>,
    ws: WebSocketUpgrade,
) -> Response {
    ws.on_upgrade(move |socket| stream_task_list(socket, state, user))
}

/// Forward live-query snapshots to the socket for as long as it stays
/// open. Dropping the feed on exit aborts the store-side listener, so a
/// closed dashboard never leaks a subscription.
async fn stream_task_list(mut socket: WebSocket, state: AppState, user: SessionUser) {
    let mut feed = match state.tasks.owner_task_feed(&user.email).await {
        Ok(feed) => feed,
        Err(e) => {
            tracing::error!(error = %e, "failed to open task feed");
            return;
        }
    };

    loop {
        tokio::select! {
            snapshot = feed.next() => {
                let Some(tasks) = snapshot else { break };
                let dtos: Vec<TaskDto> = tasks.into_iter().map(Into::into).collect();
                let payload = match serde_json::to_string(&dtos) {
                    Ok(payload) => payload,
                    Err(e) => {
                        tracing::error!(error = %e, "failed to encode task snapshot");
                        break;
                    }
                };
                if socket.send(Message::Text(payload.into())).await.is_err() {
                    break;
                }
            }
            incoming = socket.recv() => {
                match incoming {
                    // The dashboard sends nothing meaningful; ignore frames.
                    Some(Ok(_)) => continue,
                    // Closed or errored: tear the listener down.
                    _ => break,
                }
            }
        }
    }
}

pub async fn create_task(
    RequireSession(user): RequireSession,
    State(state): State<AppState>,
    Json(request): Json<CreateTaskRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let task = state
        .tasks
        .register_task(&request.text, &user.email, request.public)
        .await?;
    Ok((StatusCode::CREATED, Json(TaskDto::from(task))))
}

pub async fn delete_task(
    RequireSession(user): RequireSession,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    state.tasks.delete_task(&id.as_str().into(), &user.email).await?;
    Ok(StatusCode::NO_CONTENT)
}
