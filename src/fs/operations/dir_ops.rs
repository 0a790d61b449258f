//! Folder creation.

use super::utils::validate_name;
use crate::api::ApiResponse;
use crate::client::Client;
use crate::error::Result;
use crate::state::Form;

impl Client {
    /// Open the create-folder form.
    pub fn show_create_directory_form(&mut self) {
        self.state.form = Some(Form::CreateDirectory);
    }

    /// Create folder `name` in the current directory. Returns its path.
    pub async fn create_directory(&mut self, name: &str) -> Result<String> {
        let name =
            validate_name(name, "Please enter a folder name").map_err(|e| self.fail(e, ""))?;
        let session_id = self
            .require_session()
            .map_err(|e| self.fail(e, "Error creating folder"))?;
        let path = self.state.nav.path().child(&name);

        let result = self
            .api
            .create_directory(&path, &session_id)
            .await
            .and_then(ApiResponse::into_result);
        if let Err(e) = result {
            return Err(self.fail(e, "Error creating folder"));
        }

        tracing::info!(%path, "folder created");
        self.state.form = None;
        self.state.toast_success("Folder created successfully");
        self.refresh_and_record().await;
        Ok(path)
    }
}
