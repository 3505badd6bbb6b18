use super::*;

fn values(headers: &Headers, name: &str) -> Vec<String> {
    headers.get(name).map(<[String]>::to_vec).unwrap_or_default()
}

mod build_normal_headers {
    use super::*;

    #[test]
    fn should_emit_wildcard_origin_when_all_origins_allowed() {
        // Arrange
        let options = CorsOptions::allow_all();

        // Act
        let headers = HeaderBuilder::new(&options).build_normal_headers();

        // Assert
        assert_eq!(values(&headers, header::ACCESS_CONTROL_ALLOW_ORIGIN), vec!["*"]);
        assert!(!headers.contains(header::VARY));
    }

    #[test]
    fn should_vary_on_origin_when_origins_are_listed() {
        // Arrange
        let options = CorsOptions::default().with_origins(["https://foo.com"]);

        // Act
        let headers = HeaderBuilder::new(&options).build_normal_headers();

        // Assert
        assert_eq!(values(&headers, header::VARY), vec!["Origin"]);
        assert!(!headers.contains(header::ACCESS_CONTROL_ALLOW_ORIGIN));
    }

    #[test]
    fn should_emit_credentials_and_expose_headers_when_configured() {
        // Arrange
        let options = CorsOptions {
            allow_credentials: true,
            expose_headers: vec!["x-trace-id".into(), "X-Trace-Id".into(), "etag".into()],
            ..CorsOptions::default().with_origins(["https://foo.com"])
        };

        // Act
        let headers = HeaderBuilder::new(&options).build_normal_headers();

        // Assert
        assert_eq!(
            values(&headers, header::ACCESS_CONTROL_ALLOW_CREDENTIALS),
            vec!["true"]
        );
        assert_eq!(
            values(&headers, header::ACCESS_CONTROL_EXPOSE_HEADERS),
            vec!["X-Trace-Id,Etag"]
        );
    }

    #[test]
    fn should_omit_preflight_only_headers() {
        // Arrange
        let options = CorsOptions::allow_all();

        // Act
        let headers = HeaderBuilder::new(&options).build_normal_headers();

        // Assert
        assert!(!headers.contains(header::ACCESS_CONTROL_ALLOW_METHODS));
        assert!(!headers.contains(header::ACCESS_CONTROL_ALLOW_HEADERS));
        assert!(!headers.contains(header::ACCESS_CONTROL_MAX_AGE));
    }
}

mod build_preflight_headers {
    use super::*;

    #[test]
    fn should_render_methods_headers_and_max_age_from_defaults() {
        // Arrange
        let options = CorsOptions::allow_all();

        // Act
        let headers = HeaderBuilder::new(&options).build_preflight_headers();

        // Assert
        assert_eq!(
            values(&headers, header::ACCESS_CONTROL_ALLOW_METHODS),
            vec!["GET,POST,PUT,PATCH,DELETE,HEAD,OPTIONS"]
        );
        assert_eq!(
            values(&headers, header::ACCESS_CONTROL_ALLOW_HEADERS),
            vec!["Origin,Content-Length,Content-Type"]
        );
        assert_eq!(values(&headers, header::ACCESS_CONTROL_MAX_AGE), vec!["43200"]);
        assert_eq!(values(&headers, header::ACCESS_CONTROL_ALLOW_ORIGIN), vec!["*"]);
    }

    #[test]
    fn should_uppercase_and_dedupe_methods() {
        // Arrange
        let options = CorsOptions {
            allow_methods: vec!["get".into(), "GET".into(), "post".into()],
            ..CorsOptions::allow_all()
        };

        // Act
        let headers = HeaderBuilder::new(&options).build_preflight_headers();

        // Assert
        assert_eq!(
            values(&headers, header::ACCESS_CONTROL_ALLOW_METHODS),
            vec!["GET,POST"]
        );
    }

    #[test]
    fn should_vary_on_request_headers_when_origins_are_listed() {
        // Arrange
        let options = CorsOptions::default().with_origins(["https://foo.com"]);

        // Act
        let headers = HeaderBuilder::new(&options).build_preflight_headers();

        // Assert
        assert_eq!(
            values(&headers, header::VARY),
            vec![
                "Origin",
                "Access-Control-Request-Method",
                "Access-Control-Request-Headers"
            ]
        );
    }

    #[test]
    fn should_omit_max_age_when_zero_or_unset() {
        // Arrange
        let zero = CorsOptions {
            max_age: Some(0),
            ..CorsOptions::allow_all()
        };
        let unset = CorsOptions {
            max_age: None,
            ..CorsOptions::allow_all()
        };

        // Act
        let zero_headers = HeaderBuilder::new(&zero).build_preflight_headers();
        let unset_headers = HeaderBuilder::new(&unset).build_preflight_headers();

        // Assert
        assert!(!zero_headers.contains(header::ACCESS_CONTROL_MAX_AGE));
        assert!(!unset_headers.contains(header::ACCESS_CONTROL_MAX_AGE));
    }

    #[test]
    fn should_emit_private_network_when_enabled() {
        // Arrange
        let options = CorsOptions {
            allow_private_network: true,
            ..CorsOptions::allow_all()
        };

        // Act
        let headers = HeaderBuilder::new(&options).build_preflight_headers();

        // Assert
        assert_eq!(
            values(&headers, header::ACCESS_CONTROL_ALLOW_PRIVATE_NETWORK),
            vec!["true"]
        );
    }

    #[test]
    fn should_omit_empty_lists() {
        // Arrange
        let options = CorsOptions {
            allow_methods: Vec::new(),
            allow_headers: vec![" ".into()],
            ..CorsOptions::allow_all()
        };

        // Act
        let headers = HeaderBuilder::new(&options).build_preflight_headers();

        // Assert
        assert!(!headers.contains(header::ACCESS_CONTROL_ALLOW_METHODS));
        assert!(!headers.contains(header::ACCESS_CONTROL_ALLOW_HEADERS));
    }
}
