//! 分析提示词构造

use serde_json::Value;

use crate::models::PriceRecord;

/// 缺失字段的占位符
pub const PLACEHOLDER: &str = "N/A";

/// 字段值转为提示词中的文本，字符串不带引号
fn render(value: Option<&Value>) -> String {
    match value {
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
        None => PLACEHOLDER.to_string(),
    }
}

/// 根据最新行情构造分析提示词
///
/// 要求模型输出四段 markdown：表现总结、市场背景、投资建议、风险分析。
/// 同样的输入总是得到同样的提示词。
pub fn build_analysis_prompt(symbol: &str, record: &PriceRecord) -> String {
    let date = record.date().unwrap_or_else(|| PLACEHOLDER.to_string());

    format!(
        "Analyze the following stock data for the symbol '{symbol}' and provide a detailed investment analysis.

Latest Data:
- Date: {date}
- Close Price: {close}
- High: {high}
- Low: {low}
- Volume: {volume}

Structure your response in markdown with these sections:
1.  **Performance Summary:** Briefly summarize the day's performance.
2.  **Market Context:** How does this data fit into the stock's recent history and the broader market?
3.  **Investment Recommendation:** Give a clear, actionable recommendation (e.g., Strong Buy, Hold, Sell).
4.  **Risk Analysis:** What are the key risks an investor should consider?
",
        close = render(record.field("close")),
        high = render(record.field("high")),
        low = render(record.field("low")),
        volume = render(record.field("volume")),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn record(value: Value) -> PriceRecord {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_prompt_contains_fields() {
        let r = record(json!({
            "date": "2024-05-01T00:00:00Z",
            "close": 189.5,
            "high": 191.0,
            "low": 188.0,
            "volume": 50000000
        }));
        let prompt = build_analysis_prompt("AAPL", &r);

        assert!(prompt.contains("'AAPL'"));
        assert!(prompt.contains("- Date: 2024-05-01\n"));
        assert!(!prompt.contains("T00:00:00"));
        assert!(prompt.contains("- Close Price: 189.5\n"));
        assert!(prompt.contains("- High: 191.0\n"));
        assert!(prompt.contains("- Low: 188.0\n"));
        assert!(prompt.contains("- Volume: 50000000\n"));
        assert!(!prompt.contains(PLACEHOLDER));
    }

    /// 缺失或为 null 的字段使用占位符
    #[test]
    fn test_prompt_placeholders() {
        let r = record(json!({"close": 10.25, "volume": null}));
        let prompt = build_analysis_prompt("TCS.NS", &r);

        assert!(prompt.contains("'TCS.NS'"));
        assert!(prompt.contains("- Date: N/A\n"));
        assert!(prompt.contains("- Close Price: 10.25\n"));
        assert!(prompt.contains("- High: N/A\n"));
        assert!(prompt.contains("- Low: N/A\n"));
        assert!(prompt.contains("- Volume: N/A\n"));
    }

    #[test]
    fn test_prompt_sections() {
        let prompt = build_analysis_prompt("MSFT", &record(json!({})));
        for section in [
            "**Performance Summary:**",
            "**Market Context:**",
            "**Investment Recommendation:**",
            "**Risk Analysis:**",
        ] {
            assert!(prompt.contains(section), "缺少章节 {}", section);
        }
    }

    #[test]
    fn test_prompt_deterministic() {
        let r = record(json!({"date": "2024-05-01T00:00:00Z", "close": 1}));
        assert_eq!(build_analysis_prompt("X", &r), build_analysis_prompt("X", &r));
    }
}
