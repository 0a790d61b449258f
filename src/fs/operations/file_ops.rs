//! Preview, create, edit and delete of files in the current directory.

use super::utils::validate_name;
use crate::api::ApiResponse;
use crate::client::Client;
use crate::error::{ClientError, Result};
use crate::fs::FileEntry;
use crate::state::{ActiveFile, Form};

const VIEW_ERROR: &str = "Error viewing file";

impl Client {
    /// Open the create-file form.
    pub fn show_create_file_form(&mut self) {
        self.state.form = Some(Form::CreateFile);
    }

    /// Close whatever form is open. Closing the edit form also drops the
    /// active file.
    pub fn cancel_form(&mut self) {
        if let Some(Form::EditFile { .. }) = self.state.form.take() {
            self.state.active_file = None;
        }
    }

    /// Create `name` in the current directory. Returns the path created.
    ///
    /// # Example
    /// ```no_run
    /// # async fn example(client: &mut ofs_client::Client) -> ofs_client::Result<()> {
    /// client.navigate_to("/").await?;
    /// let path = client.create_file("notes.txt", "hi").await?;
    /// assert_eq!(path, "/notes.txt");
    /// # Ok(())
    /// # }
    /// ```
    pub async fn create_file(&mut self, name: &str, content: &str) -> Result<String> {
        let name = validate_name(name, "Please enter a file name").map_err(|e| self.fail(e, ""))?;
        let session_id = self
            .require_session()
            .map_err(|e| self.fail(e, "Error creating file"))?;
        let path = self.state.nav.path().child(&name);

        let result = self
            .api
            .create_file(&path, content, &session_id)
            .await
            .and_then(ApiResponse::into_result);
        if let Err(e) = result {
            return Err(self.fail(e, "Error creating file"));
        }

        tracing::info!(%path, "file created");
        self.state.form = None;
        self.state.toast_success("File created successfully");
        self.refresh_and_record().await;
        Ok(path)
    }

    /// Load `entry` and make it the active file.
    pub async fn view_file(&mut self, entry: &FileEntry) -> Result<()> {
        if !entry.is_file() {
            let err = ClientError::Validation(format!("{} is not a file", entry.name));
            return Err(self.fail(err, VIEW_ERROR));
        }
        let session_id = self.require_session().map_err(|e| self.fail(e, VIEW_ERROR))?;

        let result = self
            .api
            .read_file(&entry.path, &session_id)
            .await
            .and_then(ApiResponse::into_result);

        match result {
            Ok(reply) => {
                self.state.active_file = Some(ActiveFile {
                    entry: entry.clone(),
                    content: reply.content,
                });
                Ok(())
            }
            Err(e) => {
                self.state.active_file = None;
                if let ClientError::Server { .. } = e {
                    self.state.toast_error(VIEW_ERROR);
                    return Err(e);
                }
                Err(self.fail(e, VIEW_ERROR))
            }
        }
    }

    /// Close the preview.
    pub fn close_preview(&mut self) {
        self.state.active_file = None;
        if let Some(Form::EditFile { .. }) = self.state.form {
            self.state.form = None;
        }
    }

    /// Open the edit form seeded with the active file's content.
    pub fn begin_edit(&mut self) -> Result<()> {
        let Some(active) = self.state.active_file.as_ref() else {
            return Err(ClientError::NoActiveFile);
        };
        self.state.form = Some(Form::EditFile {
            draft: active.content.clone(),
        });
        Ok(())
    }

    /// Replace the draft in an open edit form.
    pub fn update_draft(&mut self, content: &str) -> Result<()> {
        match self.state.form.as_mut() {
            Some(Form::EditFile { draft }) => {
                *draft = content.to_string();
                Ok(())
            }
            _ => Err(ClientError::NoActiveFile),
        }
    }

    /// Write `content` to the active file.
    ///
    /// On failure the active file and the form stay as they were so the
    /// save can be retried.
    pub async fn save_edited_file(&mut self, content: &str) -> Result<()> {
        let Some(path) = self.state.active_file.as_ref().map(|f| f.entry.path.clone()) else {
            return Err(self.fail(ClientError::NoActiveFile, "Error updating file"));
        };
        let session_id = self
            .require_session()
            .map_err(|e| self.fail(e, "Error updating file"))?;

        let result = self
            .api
            .edit_file(&path, content, &session_id)
            .await
            .and_then(ApiResponse::into_result);
        if let Err(e) = result {
            return Err(self.fail(e, "Error updating file"));
        }

        tracing::info!(%path, "file updated");
        self.state.form = None;
        self.state.active_file = None;
        self.state.toast_success("File updated successfully");
        self.refresh_and_record().await;
        Ok(())
    }

    /// Save the draft held by the edit form.
    pub async fn save_draft(&mut self) -> Result<()> {
        let draft = match &self.state.form {
            Some(Form::EditFile { draft }) => draft.clone(),
            _ => return Err(ClientError::NoActiveFile),
        };
        self.save_edited_file(&draft).await
    }

    /// Delete the active file.
    ///
    /// Nothing is sent unless `confirmed` is true; the caller is expected to
    /// ask the user first.
    pub async fn delete_current_file(&mut self, confirmed: bool) -> Result<()> {
        let Some(path) = self.state.active_file.as_ref().map(|f| f.entry.path.clone()) else {
            return Err(self.fail(ClientError::NoActiveFile, "Error deleting file"));
        };
        if !confirmed {
            tracing::debug!(%path, "delete not confirmed");
            return Err(ClientError::ConfirmationRequired);
        }
        let session_id = self
            .require_session()
            .map_err(|e| self.fail(e, "Error deleting file"))?;

        let result = self
            .api
            .delete_file(&path, &session_id)
            .await
            .and_then(ApiResponse::into_result);
        if let Err(e) = result {
            return Err(self.fail(e, "Error deleting file"));
        }

        tracing::info!(%path, "file deleted");
        self.state.active_file = None;
        self.state.form = None;
        self.state.toast_success("File deleted successfully");
        self.refresh_and_record().await;
        Ok(())
    }
}
