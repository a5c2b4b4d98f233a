use crate::adapters::tabular::{read_table, write_table, TabularFormat};
use crate::core::transformer::RecordTransformer;
use crate::core::{ConfigProvider, Pipeline, Record, Storage, TransformResult};
use crate::utils::error::{EtlError, Result};

/// 問卷檔 -> 同理心訪談表
pub struct SurveyPipeline<S: Storage, C: ConfigProvider> {
    storage: S,
    config: C,
    transformer: RecordTransformer,
}

impl<S: Storage, C: ConfigProvider> SurveyPipeline<S, C> {
    pub fn new(storage: S, config: C) -> Self {
        let transformer =
            RecordTransformer::new(config.columns().clone(), config.interview().clone());
        Self {
            storage,
            config,
            transformer,
        }
    }
}

#[async_trait::async_trait]
impl<S: Storage, C: ConfigProvider> Pipeline for SurveyPipeline<S, C> {
    async fn extract(&self) -> Result<Vec<Record>> {
        let input = self.config.input_path();

        // 副檔名不支援時，在讀檔前就失敗
        let format = TabularFormat::for_input(input)?;

        if !self.storage.exists(input).await {
            return Err(EtlError::InputNotFound {
                path: input.to_string(),
            });
        }

        tracing::debug!("Reading {:?} as {:?}", input, format);
        let bytes = self.storage.read_file(input).await?;
        let table = read_table(&bytes, format)?;

        let missing = self.transformer.columns().missing_from(&table.headers);
        if !missing.is_empty() {
            tracing::warn!(
                "{} mapped column(s) not found in {}; their values will be N/A",
                missing.len(),
                input
            );
            for (name, header) in &missing {
                tracing::debug!("Missing column {}: {:?}", name, header);
            }
        }

        Ok(table.records)
    }

    async fn transform(&self, data: Vec<Record>) -> Result<TransformResult> {
        let processed_records = self.transformer.transform(&data);
        debug_assert_eq!(processed_records.len(), data.len());

        Ok(TransformResult {
            processed_records,
            source_rows: data.len(),
        })
    }

    async fn load(&self, result: &TransformResult) -> Result<Option<String>> {
        let Some(output) = self.config.output_path() else {
            tracing::debug!("No output path configured, skipping write");
            return Ok(None);
        };

        let format = TabularFormat::for_output(output)?;
        let bytes = write_table(&result.processed_records, format)?;

        tracing::debug!("Writing {} bytes to {}", bytes.len(), output);
        self.storage.write_file(output, &bytes).await?;

        Ok(Some(output.to_string()))
    }
}
