//! Retention of uploaded resume files in S3 / MinIO.

use async_trait::async_trait;
use aws_config::Region;
use aws_sdk_s3::config::Credentials;
use aws_sdk_s3::primitives::ByteStream;
use bytes::Bytes;
use tracing::info;

use super::StorageError;
use crate::config::S3Config;

/// Blob storage for retained uploads, addressed by object key.
#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// Bucket or container name, for logs.
    fn bucket(&self) -> &str;
    async fn put_pdf(&self, key: &str, body: Bytes) -> Result<(), StorageError>;
    async fn delete(&self, key: &str) -> Result<(), StorageError>;
}

#[derive(Clone)]
pub struct S3ObjectStore {
    client: aws_sdk_s3::Client,
    bucket: String,
}

impl S3ObjectStore {
    /// Constructs an S3 client configured for MinIO (local) or AWS (production).
    pub async fn connect(config: &S3Config) -> Self {
        let mut loader = aws_config::defaults(aws_config::BehaviorVersion::latest())
            .region(Region::new(config.region.clone()));

        if let (Some(key_id), Some(secret)) = (&config.access_key_id, &config.secret_access_key) {
            loader = loader.credentials_provider(Credentials::new(
                key_id,
                secret,
                None,
                None,
                "resumatch-static",
            ));
        }
        if let Some(endpoint) = &config.endpoint {
            loader = loader.endpoint_url(endpoint);
        }

        let sdk_config = loader.load().await;
        Self {
            client: aws_sdk_s3::Client::new(&sdk_config),
            bucket: config.bucket.clone(),
        }
    }
}

#[async_trait]
impl ObjectStore for S3ObjectStore {
    fn bucket(&self) -> &str {
        &self.bucket
    }

    async fn put_pdf(&self, key: &str, body: Bytes) -> Result<(), StorageError> {
        self.client
            .put_object()
            .bucket(&self.bucket)
            .key(key)
            .body(ByteStream::from(body))
            .content_type("application/pdf")
            .send()
            .await
            .map_err(|e| StorageError::Object(format!("S3 upload failed: {e}")))?;

        info!("Uploaded resume file to s3://{}/{}", self.bucket, key);
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<(), StorageError> {
        self.client
            .delete_object()
            .bucket(&self.bucket)
            .key(key)
            .send()
            .await
            .map_err(|e| StorageError::Object(format!("S3 delete failed: {e}")))?;
        Ok(())
    }
}

/// Object key for a retained resume upload.
pub fn resume_object_key(resume_id: &str, file_name: &str) -> String {
    let safe_name: String = file_name
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_') {
                c
            } else {
                '_'
            }
        })
        .collect();
    format!("resumes/{resume_id}/{safe_name}")
}
