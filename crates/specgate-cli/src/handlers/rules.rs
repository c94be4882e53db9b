//! Rules command handler
//!
//! Lists every error the contract's validators are able to report, per
//! model and field, without validating anything.

use crate::cli::{OutputFormat, RulesArgs};
use crate::contracts::{
    self, BodyValidator, ChangeAccountPasswordByEmailBody, ChangeAccountPasswordByEmailRoute,
    RouteValidator,
};
use crate::error::{Error, Result};
use crate::output::OutputWriter;
use serde::Serialize;
use specgate_engine::{SpecValidator, ValidatorCollection, ValidatorSource};
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::{debug, instrument};

/// Errors one contract model can receive
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ModelRules {
    pub model: String,
    pub languages: Vec<String>,
    /// Field key to messages; the empty key is the model itself
    pub errors: BTreeMap<String, Vec<String>>,
    /// Field key to error codes, omitting fields without codes
    pub codes: BTreeMap<String, Vec<String>>,
}

/// Handle the rules command
#[instrument(skip(output))]
pub fn handle_rules(args: RulesArgs, output: &mut OutputWriter) -> Result<()> {
    if args.language.as_deref().is_some_and(|l| l.trim().is_empty()) {
        return Err(Error::invalid_args("--language must not be blank"));
    }

    let rules = contract_rules(args.language.as_deref())?;
    debug!(models = rules.len(), "Collected contract rules");

    if output.format() != OutputFormat::Human {
        return output.data(&rules);
    }

    for model in &rules {
        output.section(&model.model)?;
        for (field, messages) in &model.errors {
            let field = if field.is_empty() { "(request)" } else { field.as_str() };
            output.writeln(&format!("  {}", field))?;
            for message in messages {
                output.writeln(&format!("    • {}", message))?;
            }
        }
    }
    Ok(())
}

/// Rules of every contract validator, in registration order
pub fn contract_rules(language: Option<&str>) -> Result<Vec<ModelRules>> {
    let translations = Arc::new(contracts::translations());
    let mut collection = ValidatorCollection::new();
    collection
        .add::<ChangeAccountPasswordByEmailRoute, _>(RouteValidator::new(translations.clone()))
        .add::<ChangeAccountPasswordByEmailBody, _>(BodyValidator::new(translations));

    collection
        .all()
        .iter()
        .map(|validator| model_rules(validator.as_ref(), language))
        .collect()
}

fn model_rules(validator: &dyn SpecValidator, language: Option<&str>) -> Result<ModelRules> {
    let template = validator.template();
    let errors = match language {
        Some(language) => template.translated_message_map(language).ok_or_else(|| {
            Error::invalid_args(format!(
                "Language '{}' is not supported (available: {})",
                language,
                validator.translation_names().join(", ")
            ))
        })?,
        None => template.message_map(),
    };

    let model = validator.model_type_name();
    Ok(ModelRules {
        model: model.rsplit("::").next().unwrap_or(model).to_string(),
        languages: validator.translation_names().into_iter().map(str::to_string).collect(),
        errors,
        codes: template.code_map(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_raw_rules_list_message_keys() {
        let rules = contract_rules(None).unwrap();
        let models: Vec<&str> = rules.iter().map(|r| r.model.as_str()).collect();
        assert_eq!(
            models,
            vec!["ChangeAccountPasswordByEmailRoute", "ChangeAccountPasswordByEmailBody"]
        );

        let route = &rules[0];
        assert_eq!(route.languages, vec!["English".to_string(), "Polish".to_string()]);
        assert_eq!(
            route.errors["Email"],
            vec![
                "Texts.Required".to_string(),
                "Texts.NotWhitespace".to_string(),
                "Texts.Email".to_string(),
                "Texts.MaxLength".to_string(),
            ]
        );
        assert!(route.codes.is_empty());

        let body = &rules[1];
        assert_eq!(
            body.codes[""],
            vec![contracts::PASSWORDS_MUST_NOT_EQUAL.to_string()]
        );
    }

    #[test]
    fn test_translated_rules() {
        let rules = contract_rules(Some("Polish")).unwrap();
        assert_eq!(
            rules[1].errors[""],
            vec!["Obecne i nowe hasło nie mogą być takie same.".to_string()]
        );
        assert_eq!(
            rules[1].errors["NewPassword"][3],
            "Musi być długości maksymalnie 64 znaków".to_string()
        );
    }

    #[test]
    fn test_unknown_language_is_rejected() {
        let err = contract_rules(Some("Klingon")).unwrap_err();
        assert!(err.should_show_help());
        assert!(err.to_string().contains("English, Polish"));
    }

    #[test]
    fn test_handler_writes_machine_output() {
        let mut output = OutputWriter::with_writer(
            OutputFormat::Json,
            false,
            false,
            0,
            Box::new(std::io::sink()),
        );
        handle_rules(RulesArgs { language: None }, &mut output).unwrap();

        let blank = RulesArgs {
            language: Some(" ".to_string()),
        };
        assert!(handle_rules(blank, &mut output).is_err());
    }
}
