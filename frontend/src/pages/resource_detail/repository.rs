use std::rc::Rc;

use crate::api::{ApiClient, ApiError, ResourceRecord};

#[derive(Clone)]
pub struct ResourceDetailRepository {
    client: Rc<ApiClient>,
}

/// Result of a delete: the record is gone, but the file removal may
/// have failed independently. Partial failure is reported, not rolled
/// back.
#[derive(Debug, Clone, PartialEq)]
pub struct DeleteOutcome {
    pub storage_warning: Option<String>,
}

impl ResourceDetailRepository {
    pub fn new_with_client(client: Rc<ApiClient>) -> Self {
        Self { client }
    }

    pub async fn fetch(&self, id: &str) -> Result<Option<ResourceRecord>, ApiError> {
        self.client.fetch_resource(id).await
    }

    /// Signed download URL plus the filename to save under.
    pub async fn download_url(
        &self,
        resource: &ResourceRecord,
    ) -> Result<(String, String), ApiError> {
        let file = resource.file.as_ref().ok_or_else(|| {
            ApiError::Network("File details missing for download.".to_string())
        })?;
        let object_path = object_path_for(resource, &file.name);
        let url = self.client.invoke_generate_url(&object_path).await?;
        Ok((url, file.name.clone()))
    }

    /// Remove the stored file first, then the record. A missing object
    /// is benign and only logged; any other storage failure is carried
    /// as a warning while the record deletion still proceeds.
    pub async fn delete(&self, resource: &ResourceRecord) -> Result<DeleteOutcome, ApiError> {
        let mut storage_warning = None;
        if let Some(file) = &resource.file {
            let object_path = object_path_for(resource, &file.name);
            if let Err(error) = self.client.remove_file(&object_path).await {
                if error.is_not_found() {
                    log::info!("Stored file already absent at {}", object_path);
                } else {
                    log::error!("File removal failed at {}: {}", object_path, error);
                    storage_warning = Some(format!(
                        "The resource record was deleted, but its file could not be removed: {}",
                        error
                    ));
                }
            }
        }
        self.client.delete_resource(&resource.id).await?;
        Ok(DeleteOutcome { storage_warning })
    }
}

/// Canonical object layout for resource files.
pub fn object_path_for(resource: &ResourceRecord, file_name: &str) -> String {
    format!("public/{}/{}", resource.id, file_name)
}
