//! Actor runtime: one task owns the [`Client`], UIs talk to it through a
//! cloneable [`ClientHandle`].
//!
//! Every user action is a [`Command`] with a oneshot reply. After each
//! command the actor publishes a fresh [`Snapshot`] on a watch channel,
//! before the reply is sent, so a caller that awaited a command always sees
//! its effect in [`ClientHandle::snapshot`].
//!
//! List requests run on a `JoinSet` and are applied when they complete, so
//! navigation never blocks other commands. Mutations are awaited in place;
//! the refresh they trigger is only issued once they are done.

use tokio::sync::{mpsc, oneshot, watch};
use tokio::task::JoinSet;

use crate::client::Client;
use crate::config::ClientConfig;
use crate::error::{ClientError, Result};
use crate::fs::{FileEntry, ListRequest, ListResponse};
use crate::navigation::RefreshOutcome;
use crate::snapshot::Snapshot;

/// Handle to a running [`ClientActor`].
#[derive(Clone)]
pub struct ClientHandle {
    tx: mpsc::Sender<Command>,
    snapshots: watch::Receiver<Snapshot>,
}

impl std::fmt::Debug for ClientHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClientHandle")
            .field("closed", &self.tx.is_closed())
            .finish_non_exhaustive()
    }
}

enum Command {
    Restore {
        reply: oneshot::Sender<Result<bool>>,
    },
    Login {
        username: String,
        password: String,
        reply: oneshot::Sender<Result<()>>,
    },
    Signup {
        username: String,
        password: String,
        confirm: String,
        reply: oneshot::Sender<Result<()>>,
    },
    Logout {
        reply: oneshot::Sender<Result<()>>,
    },
    ToggleSignup {
        reply: oneshot::Sender<Result<()>>,
    },
    Navigate {
        path: String,
        reply: oneshot::Sender<Result<RefreshOutcome>>,
    },
    NavigateUp {
        reply: oneshot::Sender<Result<RefreshOutcome>>,
    },
    Refresh {
        reply: oneshot::Sender<Result<RefreshOutcome>>,
    },
    Open {
        entry: FileEntry,
        reply: oneshot::Sender<Result<()>>,
    },
    SetFilter {
        query: String,
        reply: oneshot::Sender<Result<()>>,
    },
    ViewFile {
        entry: FileEntry,
        reply: oneshot::Sender<Result<()>>,
    },
    ClosePreview {
        reply: oneshot::Sender<Result<()>>,
    },
    BeginEdit {
        reply: oneshot::Sender<Result<()>>,
    },
    UpdateDraft {
        content: String,
        reply: oneshot::Sender<Result<()>>,
    },
    SaveEdit {
        content: Option<String>,
        reply: oneshot::Sender<Result<()>>,
    },
    DeleteFile {
        confirmed: bool,
        reply: oneshot::Sender<Result<()>>,
    },
    ShowCreateFile {
        reply: oneshot::Sender<Result<()>>,
    },
    ShowCreateDirectory {
        reply: oneshot::Sender<Result<()>>,
    },
    CancelForm {
        reply: oneshot::Sender<Result<()>>,
    },
    CreateFile {
        name: String,
        content: String,
        reply: oneshot::Sender<Result<String>>,
    },
    CreateDirectory {
        name: String,
        reply: oneshot::Sender<Result<String>>,
    },
    ClearNotice {
        reply: oneshot::Sender<Result<()>>,
    },
    Shutdown {
        reply: oneshot::Sender<Result<()>>,
    },
}

/// Whoever is waiting for a list request.
enum ListWaiter {
    Outcome(oneshot::Sender<Result<RefreshOutcome>>),
    Opened(oneshot::Sender<Result<()>>),
}

impl ListWaiter {
    fn send(self, res: Result<RefreshOutcome>) {
        match self {
            ListWaiter::Outcome(tx) => {
                let _ = tx.send(res);
            }
            ListWaiter::Opened(tx) => {
                let _ = tx.send(res.map(|_| ()));
            }
        }
    }
}

impl ClientHandle {
    /// Start an actor for `client`. Must be called inside a tokio runtime.
    pub fn spawn(client: Client) -> Self {
        ClientActor::spawn(client)
    }

    /// Build an HTTP client from `config`, start it, and try to restore the
    /// persisted session.
    pub async fn connect(config: &ClientConfig) -> Result<Self> {
        let handle = Self::spawn(Client::new(config)?);
        handle.restore().await?;
        Ok(handle)
    }

    /// Receiver that yields a new [`Snapshot`] after every command.
    pub fn subscribe(&self) -> watch::Receiver<Snapshot> {
        self.snapshots.clone()
    }

    /// Latest published snapshot.
    pub fn snapshot(&self) -> Snapshot {
        self.snapshots.borrow().clone()
    }

    pub fn is_closed(&self) -> bool {
        self.tx.is_closed()
    }

    async fn request<R>(&self, build: impl FnOnce(oneshot::Sender<Result<R>>) -> Command) -> Result<R> {
        let (tx, rx) = oneshot::channel();
        self.tx
            .send(build(tx))
            .await
            .map_err(|_| ClientError::ActorStopped)?;
        rx.await.map_err(|_| ClientError::ActorStopped)?
    }

    pub async fn restore(&self) -> Result<bool> {
        self.request(|reply| Command::Restore { reply }).await
    }

    pub async fn login(&self, username: &str, password: &str) -> Result<()> {
        self.request(|reply| Command::Login {
            username: username.to_string(),
            password: password.to_string(),
            reply,
        })
        .await
    }

    pub async fn signup(&self, username: &str, password: &str, confirm: &str) -> Result<()> {
        self.request(|reply| Command::Signup {
            username: username.to_string(),
            password: password.to_string(),
            confirm: confirm.to_string(),
            reply,
        })
        .await
    }

    pub async fn logout(&self) -> Result<()> {
        self.request(|reply| Command::Logout { reply }).await
    }

    pub async fn toggle_signup(&self) -> Result<()> {
        self.request(|reply| Command::ToggleSignup { reply }).await
    }

    /// Go to `path`. Resolves when its listing has been applied, dropped as
    /// outdated, or has failed.
    pub async fn navigate_to(&self, path: &str) -> Result<RefreshOutcome> {
        self.request(|reply| Command::Navigate {
            path: path.to_string(),
            reply,
        })
        .await
    }

    pub async fn navigate_up(&self) -> Result<RefreshOutcome> {
        self.request(|reply| Command::NavigateUp { reply }).await
    }

    pub async fn refresh(&self) -> Result<RefreshOutcome> {
        self.request(|reply| Command::Refresh { reply }).await
    }

    pub async fn open(&self, entry: &FileEntry) -> Result<()> {
        self.request(|reply| Command::Open {
            entry: entry.clone(),
            reply,
        })
        .await
    }

    pub async fn set_filter(&self, query: &str) -> Result<()> {
        self.request(|reply| Command::SetFilter {
            query: query.to_string(),
            reply,
        })
        .await
    }

    pub async fn view_file(&self, entry: &FileEntry) -> Result<()> {
        self.request(|reply| Command::ViewFile {
            entry: entry.clone(),
            reply,
        })
        .await
    }

    pub async fn close_preview(&self) -> Result<()> {
        self.request(|reply| Command::ClosePreview { reply }).await
    }

    pub async fn begin_edit(&self) -> Result<()> {
        self.request(|reply| Command::BeginEdit { reply }).await
    }

    pub async fn update_draft(&self, content: &str) -> Result<()> {
        self.request(|reply| Command::UpdateDraft {
            content: content.to_string(),
            reply,
        })
        .await
    }

    /// Save `content` to the active file.
    pub async fn save_edited_file(&self, content: &str) -> Result<()> {
        self.request(|reply| Command::SaveEdit {
            content: Some(content.to_string()),
            reply,
        })
        .await
    }

    /// Save the edit form's draft.
    pub async fn save_draft(&self) -> Result<()> {
        self.request(|reply| Command::SaveEdit {
            content: None,
            reply,
        })
        .await
    }

    pub async fn delete_current_file(&self, confirmed: bool) -> Result<()> {
        self.request(|reply| Command::DeleteFile { confirmed, reply })
            .await
    }

    pub async fn show_create_file_form(&self) -> Result<()> {
        self.request(|reply| Command::ShowCreateFile { reply }).await
    }

    pub async fn show_create_directory_form(&self) -> Result<()> {
        self.request(|reply| Command::ShowCreateDirectory { reply })
            .await
    }

    pub async fn cancel_form(&self) -> Result<()> {
        self.request(|reply| Command::CancelForm { reply }).await
    }

    pub async fn create_file(&self, name: &str, content: &str) -> Result<String> {
        self.request(|reply| Command::CreateFile {
            name: name.to_string(),
            content: content.to_string(),
            reply,
        })
        .await
    }

    pub async fn create_directory(&self, name: &str) -> Result<String> {
        self.request(|reply| Command::CreateDirectory {
            name: name.to_string(),
            reply,
        })
        .await
    }

    pub async fn clear_notice(&self) -> Result<()> {
        self.request(|reply| Command::ClearNotice { reply }).await
    }

    /// Stop the actor. In-flight list requests are abandoned and later calls
    /// fail with [`ClientError::ActorStopped`].
    pub async fn shutdown(&self) -> Result<()> {
        self.request(|reply| Command::Shutdown { reply }).await
    }
}

struct ClientActor {
    client: Client,
    rx: mpsc::Receiver<Command>,
    snapshots: watch::Sender<Snapshot>,
    inflight: JoinSet<(ListResponse, ListWaiter)>,
}

impl ClientActor {
    fn spawn(client: Client) -> ClientHandle {
        let (tx, rx) = mpsc::channel(64);
        let (snapshots, snapshot_rx) = watch::channel(client.snapshot());
        let actor = ClientActor {
            client,
            rx,
            snapshots,
            inflight: JoinSet::new(),
        };
        tokio::spawn(actor.run());
        ClientHandle {
            tx,
            snapshots: snapshot_rx,
        }
    }

    async fn run(mut self) {
        loop {
            tokio::select! {
                cmd = self.rx.recv() => {
                    let Some(cmd) = cmd else { break; };
                    if self.handle_command(cmd).await {
                        break;
                    }
                }
                Some(joined) = self.inflight.join_next(), if !self.inflight.is_empty() => {
                    match joined {
                        Ok((response, waiter)) => {
                            let res = self.client.finish_refresh(response);
                            self.publish();
                            waiter.send(res);
                        }
                        Err(e) => tracing::warn!("list task failed: {}", e),
                    }
                }
            }
        }
        self.inflight.abort_all();
        tracing::debug!("client actor stopped");
    }

    fn publish(&self) {
        self.snapshots.send_replace(self.client.snapshot());
    }

    fn respond<R>(&self, reply: oneshot::Sender<Result<R>>, res: Result<R>) {
        self.publish();
        let _ = reply.send(res);
    }

    /// Send a list request to the background, or fail the waiter right away.
    fn dispatch_list(&mut self, request: Result<ListRequest>, waiter: ListWaiter) {
        match request {
            Ok(request) => {
                let api = self.client.api().clone();
                self.inflight.spawn(async move { (request.fetch(&api).await, waiter) });
                self.publish();
            }
            Err(e) => {
                self.publish();
                waiter.send(Err(e));
            }
        }
    }

    /// Returns `true` when the actor should stop.
    async fn handle_command(&mut self, cmd: Command) -> bool {
        match cmd {
            Command::Restore { reply } => {
                let res = self.client.restore().await;
                self.respond(reply, res);
            }
            Command::Login {
                username,
                password,
                reply,
            } => {
                let res = self.client.login(&username, &password).await;
                self.respond(reply, res);
            }
            Command::Signup {
                username,
                password,
                confirm,
                reply,
            } => {
                let res = self.client.signup(&username, &password, &confirm).await;
                self.respond(reply, res);
            }
            Command::Logout { reply } => {
                self.client.logout().await;
                self.respond(reply, Ok(()));
            }
            Command::ToggleSignup { reply } => {
                self.client.toggle_signup();
                self.respond(reply, Ok(()));
            }
            Command::Navigate { path, reply } => {
                let request = self.client.begin_navigation(&path);
                self.dispatch_list(request, ListWaiter::Outcome(reply));
            }
            Command::NavigateUp { reply } => {
                let parent = self.client.current_path().parent();
                let request = self.client.begin_navigation(parent.as_str());
                self.dispatch_list(request, ListWaiter::Outcome(reply));
            }
            Command::Refresh { reply } => {
                let request = self.client.begin_refresh();
                self.dispatch_list(request, ListWaiter::Outcome(reply));
            }
            Command::Open { entry, reply } => {
                if entry.is_directory() {
                    let request = self.client.begin_navigation(&entry.path);
                    self.dispatch_list(request, ListWaiter::Opened(reply));
                } else {
                    let res = self.client.view_file(&entry).await;
                    self.respond(reply, res);
                }
            }
            Command::SetFilter { query, reply } => {
                self.client.set_filter(&query);
                self.respond(reply, Ok(()));
            }
            Command::ViewFile { entry, reply } => {
                let res = self.client.view_file(&entry).await;
                self.respond(reply, res);
            }
            Command::ClosePreview { reply } => {
                self.client.close_preview();
                self.respond(reply, Ok(()));
            }
            Command::BeginEdit { reply } => {
                let res = self.client.begin_edit();
                self.respond(reply, res);
            }
            Command::UpdateDraft { content, reply } => {
                let res = self.client.update_draft(&content);
                self.respond(reply, res);
            }
            Command::SaveEdit { content, reply } => {
                let res = match content {
                    Some(content) => self.client.save_edited_file(&content).await,
                    None => self.client.save_draft().await,
                };
                self.respond(reply, res);
            }
            Command::DeleteFile { confirmed, reply } => {
                let res = self.client.delete_current_file(confirmed).await;
                self.respond(reply, res);
            }
            Command::ShowCreateFile { reply } => {
                self.client.show_create_file_form();
                self.respond(reply, Ok(()));
            }
            Command::ShowCreateDirectory { reply } => {
                self.client.show_create_directory_form();
                self.respond(reply, Ok(()));
            }
            Command::CancelForm { reply } => {
                self.client.cancel_form();
                self.respond(reply, Ok(()));
            }
            Command::CreateFile {
                name,
                content,
                reply,
            } => {
                let res = self.client.create_file(&name, &content).await;
                self.respond(reply, res);
            }
            Command::CreateDirectory { name, reply } => {
                let res = self.client.create_directory(&name).await;
                self.respond(reply, res);
            }
            Command::ClearNotice { reply } => {
                self.client.clear_notice();
                self.respond(reply, Ok(()));
            }
            Command::Shutdown { reply } => {
                self.respond(reply, Ok(()));
                return true;
            }
        }
        false
    }
}
