use crate::core::Pipeline;
use crate::domain::model::EmpathyRecord;
use crate::utils::error::Result;

#[derive(Debug, Clone)]
pub struct EtlReport {
    pub records: Vec<EmpathyRecord>,
    pub output_path: Option<String>,
}

impl EtlReport {
    pub fn record_count(&self) -> usize {
        self.records.len()
    }

    /// 以輸出欄位名稱為 key 的 JSON 陣列
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(&self.records)?)
    }
}

pub struct EtlEngine<P: Pipeline> {
    pipeline: P,
}

impl<P: Pipeline> EtlEngine<P> {
    pub fn new(pipeline: P) -> Self {
        Self { pipeline }
    }

    /// 每個階段只執行一次；任一階段失敗就中止，不會寫出部分結果
    pub async fn run(&self) -> Result<EtlReport> {
        tracing::info!("Starting survey conversion");

        let raw_data = self.pipeline.extract().await?;
        tracing::info!("Extracted {} survey responses", raw_data.len());

        let transformed = self.pipeline.transform(raw_data).await?;
        tracing::info!(
            "Transformed {} records",
            transformed.processed_records.len()
        );

        let output_path = self.pipeline.load(&transformed).await?;
        if let Some(path) = &output_path {
            tracing::info!("Saved formatted data to {}", path);
        }

        Ok(EtlReport {
            records: transformed.processed_records,
            output_path,
        })
    }
}
