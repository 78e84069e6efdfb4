use crate::models;
use sqlx::{Postgres, Transaction};
use tracing::Instrument;

/// Store a processed asset; a repeated host asset id refreshes the existing row.
pub async fn upsert(
    tx: &mut Transaction<'_, Postgres>,
    asset: &models::VideoAsset,
) -> Result<models::VideoAsset, String> {
    let query_span = tracing::info_span!("Saving video asset", asset_id = %asset.asset_id);
    sqlx::query_as::<_, models::VideoAsset>(
        r#"
        INSERT INTO video_asset (id, asset_id, playback_id, status, aspect_ratio, duration, created_at)
        VALUES ($1, $2, $3, $4, $5, $6, NOW())
        ON CONFLICT (asset_id) DO UPDATE
            SET playback_id = EXCLUDED.playback_id,
                status = EXCLUDED.status,
                aspect_ratio = EXCLUDED.aspect_ratio,
                duration = EXCLUDED.duration
        RETURNING *
        "#,
    )
    .bind(asset.id)
    .bind(&asset.asset_id)
    .bind(&asset.playback_id)
    .bind(&asset.status)
    .bind(&asset.aspect_ratio)
    .bind(asset.duration)
    .fetch_one(&mut **tx)
    .instrument(query_span)
    .await
    .map_err(|e| {
        tracing::error!("Failed to save video asset: {:?}", e);
        "Failed to save video asset".to_string()
    })
}
