use std::time::Duration;

use async_trait::async_trait;
use targum_config::dictionary::DictionaryConfig;
use targum_config::network::NetworkConfig;
use targum_dictionary::EntryParser;
use targum_translator::{ProviderMetadata, TranslateError, Translator};
use targum_types::TranslationRecord;

/// English to Hebrew lookups scraped from Morfix result pages
#[derive(Clone)]
pub struct MorfixTranslator {
    client: reqwest::Client,
    network: NetworkConfig,
    parser: EntryParser,
}

impl MorfixTranslator {
    pub fn new(
        network: NetworkConfig,
        dictionary: &DictionaryConfig,
    ) -> Result<Self, TranslateError> {
        let parser = EntryParser::from_config(dictionary)
            .map_err(|e| TranslateError::Layout(e.to_string()))?;

        let client = reqwest::Client::builder()
            .timeout(Duration::from_millis(network.timeout_ms))
            .user_agent(network.user_agent.clone())
            .build()?;

        Ok(Self {
            client,
            network,
            parser,
        })
    }
}

#[async_trait]
impl Translator for MorfixTranslator {
    fn page_url(&self, query: &str) -> String {
        self.network.page_url(query)
    }

    async fn lookup(&self, query: &str) -> Result<Vec<TranslationRecord>, TranslateError> {
        let url = self.page_url(query);
        tracing::debug!(%url, "fetching result page");

        let response = self.client.get(&url).send().await?;

        if !response.status().is_success() {
            return Err(TranslateError::HttpStatus {
                status: response.status().as_u16(),
                url,
            });
        }

        let html = response.text().await?;
        Ok(self.parser.parse(&html))
    }

    fn metadata(&self) -> ProviderMetadata {
        ProviderMetadata {
            name: "Morfix".to_string(),
            from: "en".to_string(),
            to: "he".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;

    const DOG_PAGE: &str = r#"<html><body>
        <div class="Translation_content_enTohe">
            <div class="Translation_spTop_enTohe">dog</div>
            <div class="Translation_sp2Top_enTohe">noun</div>
            <div class="normal_translation_div">כלב</div>
            <div class="SampleSentences_text">The <b>dog</b> is asleep.</div>
        </div>
    </body></html>"#;

    fn translator(server: &MockServer) -> MorfixTranslator {
        let network = NetworkConfig {
            base_url: server.uri(),
            ..NetworkConfig::default()
        };
        MorfixTranslator::new(network, &DictionaryConfig::default()).unwrap()
    }

    #[tokio::test]
    async fn lookup_parses_result_page() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/dog"))
            .respond_with(ResponseTemplate::new(200).set_body_string(DOG_PAGE))
            .expect(1)
            .mount(&server)
            .await;

        let records = translator(&server).lookup("dog").await.unwrap();

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].source_word, "dog");
        assert_eq!(records[0].target_meanings, vec!["כלב"]);
        assert_eq!(records[0].sample_sentences, vec!["The <b>dog</b> is asleep."]);
    }

    #[tokio::test]
    async fn query_is_percent_encoded() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/hot%20dog"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html></html>"))
            .expect(1)
            .mount(&server)
            .await;

        let records = translator(&server).lookup("hot dog").await.unwrap();

        assert!(records.is_empty());
    }

    #[tokio::test]
    async fn server_error_is_reported() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let err = translator(&server).lookup("dog").await.unwrap_err();

        assert!(matches!(err, TranslateError::HttpStatus { status: 500, .. }));
    }

    #[test]
    fn broken_layout_config_is_rejected() {
        let dictionary = DictionaryConfig {
            entry: ":::".to_string(),
            ..DictionaryConfig::default()
        };

        let result = MorfixTranslator::new(NetworkConfig::default(), &dictionary);

        assert!(matches!(result, Err(TranslateError::Layout(_))));
    }
}
