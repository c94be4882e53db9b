//! Validate command handler

use crate::cli::ValidateArgs;
use crate::config::Config;
use crate::contracts::{
    self, BodyValidator, ChangeAccountPasswordByEmailBody, ChangeAccountPasswordByEmailRoute,
    RouteValidator,
};
use crate::error::{Error, Result};
use crate::logging::{current_request_id, redaction, timing::Timer};
use crate::output::{OutputWriter, ValidationReport};
use specgate_pipeline::language::LANGUAGE_HEADER;
use specgate_pipeline::{
    HeaderLanguageProvider, LanguageProvider, MessageTranslator, ModelState, RequestContext,
    SpecValidation, SpecValidationOptions,
};
use std::fs;
use std::path::Path;
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};

/// A bound change-password request plus the caller's language
#[derive(Debug, Clone, Default)]
pub struct ValidateRequest {
    pub route: ChangeAccountPasswordByEmailRoute,
    pub body: ChangeAccountPasswordByEmailBody,
    pub language: Option<String>,
}

/// Handle the validate command
#[instrument(skip(config, output), fields(file = %args.body.display()))]
pub fn handle_validate(
    args: ValidateArgs,
    config: &Config,
    output: &mut OutputWriter,
) -> Result<()> {
    let timer = Timer::with_details("validate_command", &format!("file: {}", args.body.display()));
    output.info(&format!("Validating request body: {}", args.body.display()))?;

    if args.language.as_deref().is_some_and(|l| l.trim().is_empty()) {
        return Err(Error::invalid_args("--language must not be blank"));
    }

    let options = effective_options(&args, config);
    let request = ValidateRequest {
        route: ChangeAccountPasswordByEmailRoute { email: args.email },
        body: read_body(&args.body)?,
        language: args.language,
    };

    if args.detailed || config.output.detailed {
        let mut bound = serde_json::json!({ "route": &request.route, "body": &request.body });
        redaction::redact_json_value(&mut bound);
        output.section("Bound Request")?;
        output.data(&bound)?;
    }

    let report = validate_request(&request, options)?;
    debug!(elapsed_ms = timer.elapsed().as_millis() as u64, "Validation finished");

    if report.valid {
        info!("Request is valid");
        output.success("✓ Request is valid")?;
        output.report(&report)?;
        return Ok(());
    }

    warn!(errors = report.error_count(), "Request is invalid");
    output.error("✗ Request is invalid")?;
    output.report(&report)?;

    Err(Error::ValidationFailed {
        errors: report.error_count(),
        fields: report.errors.len(),
    })
}

/// Bind and validate one request the way the web host would
pub fn validate_request(
    request: &ValidateRequest,
    options: SpecValidationOptions,
) -> Result<ValidationReport> {
    let translations = Arc::new(contracts::translations());
    let language_provider = Arc::new(HeaderLanguageProvider::new(LANGUAGE_HEADER));
    let translator = MessageTranslator::from_options(&options);

    let validation = {
        let _build_timer = Timer::new("pipeline_setup");
        SpecValidation::builder()
            .with_options(options)
            .with_language_provider(language_provider.clone())
            .add_validator::<ChangeAccountPasswordByEmailRoute, _>(RouteValidator::new(
                translations.clone(),
            ))
            .add_validator::<ChangeAccountPasswordByEmailBody, _>(BodyValidator::new(
                translations.clone(),
            ))
            .build()?
    };

    let mut context = RequestContext::new().with_request_id(current_request_id());
    if let Some(language) = &request.language {
        context = context.with_header(LANGUAGE_HEADER, language.clone());
    }

    // Each parameter is bound then validated before the next one is bound
    let mut state = ModelState::new();
    validation.bind_parameter(&mut state, "route", "", &request.route)?;
    let route_valid =
        validation.validate_parameter(&context, &mut state, "route", "", Some(&request.route))?;
    validation.bind_parameter(&mut state, "body", "", &request.body)?;
    let body_valid =
        validation.validate_parameter(&context, &mut state, "body", "", Some(&request.body))?;
    debug!(route_valid, body_valid, "Parameters validated");

    let language = [
        translator.resolve_language(Some(&*language_provider as &dyn LanguageProvider), &context),
        translator.default_language().map(str::to_string),
    ]
    .into_iter()
    .flatten()
    .find(|language| translations.contains(language));

    Ok(ValidationReport {
        valid: state.is_valid(),
        language,
        errors: state.to_error_map(),
    })
}

fn effective_options(args: &ValidateArgs, config: &Config) -> SpecValidationOptions {
    let mut options = config.validation.clone();
    if args.no_implicit {
        options.implicit_validation_enabled = false;
    }
    if args.no_root_collection_elements {
        options.implicit_root_collection_element_validation_enabled = false;
    }
    if args.fail_fast {
        options.fail_fast = true;
    }
    if let Some(language) = &args.default_language {
        options.default_language = Some(language.clone());
    }
    options
}

fn read_body(path: &Path) -> Result<ChangeAccountPasswordByEmailBody> {
    if !path.exists() {
        return Err(Error::FileNotFound {
            path: path.to_path_buf(),
        });
    }

    let content = fs::read_to_string(path)?;
    debug!(bytes = content.len(), "Read request body");

    let is_yaml = path
        .extension()
        .and_then(|s| s.to_str())
        .is_some_and(|s| s == "yaml" || s == "yml");

    if is_yaml {
        serde_yaml::from_str(&content).map_err(|_| Error::InvalidFormat {
            path: path.to_path_buf(),
            expected: "YAML".to_string(),
        })
    } else {
        serde_json::from_str(&content).map_err(|_| Error::InvalidFormat {
            path: path.to_path_buf(),
            expected: "JSON".to_string(),
        })
    }
}
