//! # Integration Tests
//!
//! 集成测试与端到端测试。
//!
//! 负责：
//! - 合约快照测试
//! - 经 mockito 网关的 e2e 派发测试
//! - 失败语义回归基线

#[cfg(test)]
mod contract_tests {
    #[test]
    fn test_contracts_compile() {
        // 验证 contracts crate 可编译
        let _ = contracts::ConfigVersion::V1;
    }
}

#[cfg(test)]
mod metrics_tests {
    use bytes::Bytes;
    use contracts::{DispatchContext, InvocationOutcome, InvocationReply};

    /// Metric recorders must be no-ops (not panics) when no exporter is
    /// installed
    #[test]
    fn test_recording_without_exporter_is_safe() {
        let reply = InvocationReply {
            body: Some(Bytes::from_static(b"ok")),
            status: 200,
            headers: Default::default(),
        };
        let outcome = InvocationOutcome::success(DispatchContext::new(), "t", "f", reply);
        observability::record_outcome(&outcome);

        let failed = InvocationOutcome::validation_failure(DispatchContext::new());
        observability::record_outcome(&failed);

        observability::record_dispatch("t", 2, 1.5);
        observability::record_dispatch("unknown", 0, 0.1);
    }
}

#[cfg(test)]
mod e2e_tests {
    use bytes::Bytes;
    use std::collections::HashMap;

    use contracts::{ContractError, DispatchContext, InvocationOutcome, TopicMap};
    use dispatcher::{Dispatcher, DispatcherConfig};
    use invoker::FunctionClient;

    fn topic_map(entries: &[(&str, &[&str])]) -> TopicMap {
        TopicMap::new(entries.iter().map(|(topic, functions)| {
            (
                topic.to_string(),
                functions.iter().map(|f| f.to_string()).collect(),
            )
        }))
    }

    /// Dispatch one event against `gateway_url` and collect every outcome
    async fn dispatch_and_collect(
        gateway_url: &str,
        map: TopicMap,
        topic: &str,
        payload: Bytes,
        headers: Option<HashMap<String, String>>,
        ctx: DispatchContext,
    ) -> Vec<InvocationOutcome> {
        let (dispatcher, mut rx) = Dispatcher::new(
            DispatcherConfig {
                gateway_url: gateway_url.to_string(),
            },
            FunctionClient::new(),
        );

        let topic = topic.to_string();
        let producer = tokio::spawn(async move {
            dispatcher
                .dispatch_with_context(ctx, &map, &topic, &payload, headers.as_ref())
                .await;
            drop(dispatcher);
        });

        let mut outcomes = Vec::new();
        while let Some(outcome) = rx.recv().await {
            outcomes.push(outcome);
        }
        producer.await.unwrap();
        outcomes
    }

    /// End-to-end test: event -> Dispatcher -> FunctionClient -> mock gateway
    ///
    /// 验证完整的数据流：
    /// 1. TopicMap 按绑定顺序解析订阅函数
    /// 2. Dispatcher 逐个经 HTTP 调用
    /// 3. 每次调用产生一个带 topic/function 关联的结果
    #[tokio::test]
    async fn test_e2e_fanout_through_mock_gateway() {
        let mut server = mockito::Server::new_async().await;
        let charge = server
            .mock("POST", "/charge")
            .match_body("order-42")
            .with_status(200)
            .with_body("charged")
            .create_async()
            .await;
        let audit = server
            .mock("POST", "/audit")
            .match_body("order-42")
            .with_status(202)
            .with_body("recorded")
            .create_async()
            .await;

        let outcomes = dispatch_and_collect(
            &server.url(),
            topic_map(&[("billing.created", &["charge", "audit"])]),
            "billing.created",
            Bytes::from_static(b"order-42"),
            None,
            DispatchContext::new(),
        )
        .await;

        assert_eq!(outcomes.len(), 2);

        assert_eq!(outcomes[0].function, "charge");
        assert_eq!(outcomes[0].status, 200);
        assert_eq!(outcomes[0].body.as_deref(), Some(b"charged".as_ref()));

        assert_eq!(outcomes[1].function, "audit");
        assert_eq!(outcomes[1].status, 202);
        assert_eq!(outcomes[1].body.as_deref(), Some(b"recorded".as_ref()));

        assert!(outcomes.iter().all(|o| o.topic == "billing.created"));
        assert!(outcomes.iter().all(|o| !o.is_error()));

        charge.assert_async().await;
        audit.assert_async().await;
    }

    /// A non-2xx response is a completed exchange with verbatim status, not
    /// an error outcome
    #[tokio::test]
    async fn test_e2e_non_2xx_status_passes_through() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/flaky")
            .with_status(500)
            .with_body("boom")
            .create_async()
            .await;

        let outcomes = dispatch_and_collect(
            &server.url(),
            topic_map(&[("t", &["flaky"])]),
            "t",
            Bytes::from_static(b"x"),
            None,
            DispatchContext::new(),
        )
        .await;

        assert_eq!(outcomes.len(), 1);
        assert!(!outcomes[0].is_error());
        assert_eq!(outcomes[0].status, 500);
        assert_eq!(outcomes[0].body.as_deref(), Some(b"boom".as_ref()));
    }

    /// Unreachable gateway: every target still yields one tagged outcome and
    /// dispatch returns normally
    #[tokio::test]
    async fn test_e2e_unreachable_gateway_tags_every_target() {
        let outcomes = dispatch_and_collect(
            "http://127.0.0.1:1",
            topic_map(&[("t", &["f1", "f2"])]),
            "t",
            Bytes::from_static(b"x"),
            None,
            DispatchContext::new(),
        )
        .await;

        assert_eq!(outcomes.len(), 2);
        for outcome in &outcomes {
            assert!(outcome.is_error());
            assert_eq!(outcome.status, 503);
            assert!(outcome.function.is_empty());
            assert!(outcome
                .error
                .as_ref()
                .unwrap()
                .to_string()
                .starts_with("unable to invoke"));
        }
    }

    /// Empty payload publishes the validation outcome and still dispatches
    #[tokio::test]
    async fn test_e2e_empty_payload_double_effect() {
        let mut server = mockito::Server::new_async().await;
        let echo = server
            .mock("POST", "/echo")
            .with_status(200)
            .create_async()
            .await;

        let outcomes = dispatch_and_collect(
            &server.url(),
            topic_map(&[("t", &["echo"])]),
            "t",
            Bytes::new(),
            None,
            DispatchContext::new(),
        )
        .await;

        assert_eq!(outcomes.len(), 2);
        assert!(matches!(
            outcomes[0].error,
            Some(ContractError::EmptyPayload)
        ));
        assert_eq!(outcomes[1].function, "echo");
        assert!(!outcomes[1].is_error());

        // The empty-body invocation really reached the gateway
        echo.assert_async().await;
    }

    /// Custom headers reach the gateway with exactly one value
    #[tokio::test]
    async fn test_e2e_header_forwarding() {
        let mut server = mockito::Server::new_async().await;
        let traced = server
            .mock("POST", "/traced")
            .match_header("x-trace", "abc")
            .with_status(200)
            .create_async()
            .await;

        let headers = HashMap::from([("X-Trace".to_string(), "abc".to_string())]);
        let outcomes = dispatch_and_collect(
            &server.url(),
            topic_map(&[("t", &["traced"])]),
            "t",
            Bytes::from_static(b"x"),
            Some(headers),
            DispatchContext::new(),
        )
        .await;

        assert_eq!(outcomes.len(), 1);
        assert!(!outcomes[0].is_error());
        traced.assert_async().await;
    }

    /// Cancelling the context surfaces as an error outcome, not a failure of
    /// the dispatch call
    #[tokio::test]
    async fn test_e2e_cancelled_context_becomes_outcome() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/slow")
            .with_status(200)
            .create_async()
            .await;

        let ctx = DispatchContext::new();
        ctx.cancel();

        let outcomes = dispatch_and_collect(
            &server.url(),
            topic_map(&[("t", &["slow"])]),
            "t",
            Bytes::from_static(b"x"),
            None,
            ctx.clone(),
        )
        .await;

        assert_eq!(outcomes.len(), 1);
        assert!(outcomes[0].is_error());
        assert_eq!(outcomes[0].context.id(), ctx.id());

        let error = outcomes[0].error.as_ref().unwrap();
        let source = std::error::Error::source(error).unwrap();
        assert!(source.to_string().contains("cancelled"));
    }

    /// Config file to running relay: trailing slash in the gateway URL is
    /// normalized before target addresses are built
    #[tokio::test]
    async fn test_e2e_config_normalization_reaches_gateway() {
        let mut server = mockito::Server::new_async().await;
        let hit = server
            .mock("POST", "/notify")
            .with_status(200)
            .create_async()
            .await;

        let content = format!(
            r#"
[gateway]
url = "{}/"

[[topics]]
topic = "orders.created"
functions = ["notify"]
"#,
            server.url()
        );
        let config =
            config_loader::ConfigLoader::load_from_str(&content, config_loader::ConfigFormat::Toml)
                .unwrap();
        let map = TopicMap::from_bindings(&config.topics);

        let outcomes = dispatch_and_collect(
            &config.gateway.url,
            map,
            "orders.created",
            Bytes::from_static(b"x"),
            None,
            DispatchContext::new(),
        )
        .await;

        assert_eq!(outcomes.len(), 1);
        assert!(!outcomes[0].is_error());
        hit.assert_async().await;
    }
}
