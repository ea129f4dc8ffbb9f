// src/tutor.rs
//! Prompt construction and the two fetchers used by the UI.
//!
//! Both fetchers always return display text. Failures are logged and turned
//! into an error line that is shown where the content would have been.

use std::sync::Arc;
use tracing::warn;

use crate::catalog::ModuleType;
use crate::gemini::{GenerateRequest, TextGenerator};
use crate::log_error;

pub const NO_CONTENT: &str = "No content generated.";
pub const NO_ANALYSIS: &str = "No analysis generated.";
pub const CONTENT_ERROR_PREFIX: &str = "Error loading content: ";
pub const ANALYSIS_ERROR_PREFIX: &str = "Error analyzing code: ";

pub fn explanation_prompt(module: ModuleType, topic_title: &str, context: &str) -> String {
    format!(
        r#"Role: You are an expert professor in {module}.
Task: Explain the concept of "{topic_title}".
Context: {context}

Requirements:
1. Use clear, academic but accessible language (Chinese).
2. Use Markdown formatting (headers, bold, code blocks).
3. Adhere to "Number & Shape Combination" (数型结合): Explain the math formulas and describe how they look geometrically or graphically.
4. Provide a small Python code snippet example where applicable.
5. Keep it under 800 words.
"#
    )
}

/// The uploaded code is embedded verbatim.
pub fn analysis_prompt(code: &str, file_name: &str) -> String {
    format!(
        r#"You are a senior Python and AI engineer.
The user has uploaded a file named "{file_name}".

Please analyze the following code:
```python
{code}
```

Provide:
1. A summary of what the code does.
2. Line-by-line or block-by-block explanation of key logic.
3. Suggestions for optimization or bug fixes if any.
4. Return the response in Markdown format (Chinese).
"#
    )
}

#[derive(Debug, Clone)]
pub struct Tutor {
    generator: Arc<dyn TextGenerator>,
    thinking_budget: u32,
}

impl Tutor {
    pub fn new(generator: Arc<dyn TextGenerator>, thinking_budget: u32) -> Self {
        Self {
            generator,
            thinking_budget,
        }
    }

    /// One request per call, never cached.
    pub async fn fetch_topic_explanation(
        &self,
        module: ModuleType,
        topic_title: &str,
        context: &str,
    ) -> String {
        let request = GenerateRequest::plain(explanation_prompt(module, topic_title, context));

        match self.generator.generate(request).await {
            Ok(text) if text.is_empty() => NO_CONTENT.to_string(),
            Ok(text) => text,
            Err(e) => {
                warn!("Explanation request for '{}' failed: {}", topic_title, e);
                log_error!("Gemini API Error: {}", e);
                format!("{}{}", CONTENT_ERROR_PREFIX, e)
            }
        }
    }

    pub async fn analyze_uploaded_code(&self, code: &str, file_name: &str) -> String {
        let request =
            GenerateRequest::with_thinking(analysis_prompt(code, file_name), self.thinking_budget);

        match self.generator.generate(request).await {
            Ok(text) if text.is_empty() => NO_ANALYSIS.to_string(),
            Ok(text) => text,
            Err(e) => {
                warn!("Analysis request for '{}' failed: {}", file_name, e);
                log_error!("Code Analysis Error: {}", e);
                format!("{}{}", ANALYSIS_ERROR_PREFIX, e)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{Result, TutorError};
    use async_trait::async_trait;
    use std::sync::Mutex;

    #[derive(Debug, Default)]
    struct Recorder {
        reply: String,
        fail: bool,
        seen: Mutex<Vec<GenerateRequest>>,
    }

    #[async_trait]
    impl TextGenerator for Recorder {
        async fn generate(&self, request: GenerateRequest) -> Result<String> {
            self.seen.lock().unwrap().push(request);
            if self.fail {
                Err(TutorError::Api { status: 503, body: "overloaded".to_string() })
            } else {
                Ok(self.reply.clone())
            }
        }
    }

    fn tutor(recorder: Arc<Recorder>) -> Tutor {
        Tutor::new(recorder, 1024)
    }

    #[test]
    fn test_explanation_prompt_mentions_module_topic_and_context() {
        let prompt = explanation_prompt(ModuleType::Math, "微积分: 梯度与优化", "Calculus, gradients.");
        assert!(prompt.starts_with("Role: You are an expert professor in MATH."));
        assert!(prompt.contains("Task: Explain the concept of \"微积分: 梯度与优化\"."));
        assert!(prompt.contains("Context: Calculus, gradients."));
        assert!(prompt.contains("Keep it under 800 words."));
    }

    #[test]
    fn test_analysis_prompt_embeds_code_verbatim() {
        let code = "def f(x):\n    return x * 2  # \"quoted\" ```";
        let prompt = analysis_prompt(code, "model.py");
        assert!(prompt.contains("uploaded a file named \"model.py\""));
        assert!(prompt.contains(&format!("```python\n{}\n```", code)));
    }

    #[tokio::test]
    async fn test_explanation_uses_plain_call_shape() {
        let recorder = Arc::new(Recorder { reply: "## 梯度".to_string(), ..Default::default() });
        let text = tutor(recorder.clone())
            .fetch_topic_explanation(ModuleType::Math, "t", "c")
            .await;

        assert_eq!(text, "## 梯度");
        let seen = recorder.seen.lock().unwrap();
        assert_eq!(seen.len(), 1);
        assert_eq!(seen[0].thinking_budget, None);
    }

    #[tokio::test]
    async fn test_analysis_uses_thinking_budget() {
        let recorder = Arc::new(Recorder { reply: "ok".to_string(), ..Default::default() });
        tutor(recorder.clone()).analyze_uploaded_code("print(1)", "a.py").await;

        let seen = recorder.seen.lock().unwrap();
        assert_eq!(seen[0].thinking_budget, Some(1024));
    }

    #[tokio::test]
    async fn test_empty_replies_use_fallback_text() {
        let recorder = Arc::new(Recorder::default());
        let tutor = tutor(recorder);
        assert_eq!(tutor.fetch_topic_explanation(ModuleType::Dl, "t", "c").await, NO_CONTENT);
        assert_eq!(tutor.analyze_uploaded_code("", "a.txt").await, NO_ANALYSIS);
    }

    #[tokio::test]
    async fn test_failures_become_error_text() {
        let recorder = Arc::new(Recorder { fail: true, ..Default::default() });
        let tutor = tutor(recorder);

        let text = tutor.fetch_topic_explanation(ModuleType::Rl, "t", "c").await;
        assert!(text.starts_with(CONTENT_ERROR_PREFIX));
        assert!(text.contains("503"));

        let text = tutor.analyze_uploaded_code("x = 1", "a.py").await;
        assert!(text.starts_with(ANALYSIS_ERROR_PREFIX));
    }
}
