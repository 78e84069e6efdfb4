use crate::configuration::UploadSettings;
use crate::forms::UploadedFile;
use uuid::Uuid;

pub const IMAGE_EXTENSIONS: [&str; 5] = ["png", "jpg", "jpeg", "gif", "webp"];

/// Write an uploaded image under `settings.dir` and return its public URL.
pub async fn store_image(settings: &UploadSettings, file: &UploadedFile) -> Result<String, String> {
    let extension = file
        .extension()
        .filter(|ext| IMAGE_EXTENSIONS.contains(&ext.as_str()))
        .ok_or_else(|| format!("thumbnail must be one of: {}", IMAGE_EXTENSIONS.join(", ")))?;

    tokio::fs::create_dir_all(&settings.dir).await.map_err(|err| {
        tracing::error!("Failed to create upload dir {}: {:?}", settings.dir, err);
        "Failed to store file".to_string()
    })?;

    let name = format!("{}.{}", Uuid::new_v4(), extension);
    let path = std::path::Path::new(&settings.dir).join(&name);
    tokio::fs::write(&path, &file.bytes).await.map_err(|err| {
        tracing::error!("Failed to write {:?}: {:?}", path, err);
        "Failed to store file".to_string()
    })?;

    Ok(format!("{}/{}", settings.public_path.trim_end_matches('/'), name))
}
