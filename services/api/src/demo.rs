use crate::infra::{build_service, load_model, parse_amount};
use clap::Args;
use income_sentinel::config::AppConfig;
use income_sentinel::error::AppError;
use income_sentinel::workflows::screening::{
    slab_of, tax_on, DeclarationBatch, ScreeningReport, ScreeningService, TaxpayerDeclaration,
    TaxpayerIdentity,
};
use std::path::{Path, PathBuf};

const DEMO_MODEL_PATH: &str = "demos/income_model.json";

/// The bundled artifact, found from the working directory or the workspace checkout.
fn demo_model_path() -> PathBuf {
    let local = PathBuf::from(DEMO_MODEL_PATH);
    if local.exists() {
        return local;
    }
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("../..")
        .join(DEMO_MODEL_PATH)
}

#[derive(Args, Debug)]
pub(crate) struct ScreenArgs {
    /// Taxpayer's full name
    #[arg(long)]
    pub(crate) name: String,
    /// PAN card number
    #[arg(long)]
    pub(crate) pan: String,
    /// Aadhaar card number
    #[arg(long)]
    pub(crate) aadhaar: String,
    /// Bank account number
    #[arg(long)]
    pub(crate) bank_account: String,
    #[arg(long)]
    pub(crate) age: u8,
    /// Salaried, Self-employed, or Business
    #[arg(long)]
    pub(crate) occupation: String,
    /// Single or Married
    #[arg(long, default_value = "Single")]
    pub(crate) marital_status: String,
    /// Yes or No
    #[arg(long, default_value = "No")]
    pub(crate) children: String,
    /// Reported base income for the year
    #[arg(long, value_parser = parse_amount)]
    pub(crate) reported_income: f64,
    #[arg(long, value_parser = parse_amount)]
    pub(crate) interest_income: Option<f64>,
    #[arg(long, value_parser = parse_amount)]
    pub(crate) capital_gains: Option<f64>,
    /// Model artifact to use instead of APP_MODEL_PATH
    #[arg(long)]
    pub(crate) model: Option<PathBuf>,
    /// Print the report as JSON
    #[arg(long)]
    pub(crate) json: bool,
}

#[derive(Args, Debug)]
pub(crate) struct BatchArgs {
    /// CSV file with one declaration per row
    #[arg(long)]
    pub(crate) input: PathBuf,
    /// Model artifact to use instead of APP_MODEL_PATH
    #[arg(long)]
    pub(crate) model: Option<PathBuf>,
}

#[derive(Args, Debug)]
pub(crate) struct TaxArgs {
    /// Annual income to evaluate
    #[arg(value_parser = parse_amount)]
    pub(crate) income: f64,
}

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Model artifact for the demo (defaults to the bundled demo model)
    #[arg(long)]
    pub(crate) model: Option<PathBuf>,
}

fn service_for(model: Option<&Path>) -> Result<ScreeningService, AppError> {
    let config = AppConfig::load()?;
    let (handle, _) = load_model(&config, model)?;
    Ok(build_service(&config, handle))
}

pub(crate) fn run_screen(args: ScreenArgs) -> Result<(), AppError> {
    let service = service_for(args.model.as_deref())?;
    let declaration = TaxpayerDeclaration {
        identity: TaxpayerIdentity {
            full_name: args.name,
            pan: args.pan,
            aadhaar: args.aadhaar,
            bank_account: args.bank_account,
        },
        age: args.age,
        occupation: args.occupation,
        marital_status: args.marital_status,
        children: args.children,
        reported_income: args.reported_income,
        interest_income: args.interest_income,
        capital_gains: args.capital_gains,
    };

    let report = service.screen(declaration)?;
    if args.json {
        match serde_json::to_string_pretty(&report) {
            Ok(json) => println!("{json}"),
            Err(err) => println!("Report unavailable as JSON: {err}"),
        }
    } else {
        render_report(&report);
    }
    Ok(())
}

pub(crate) fn run_batch(args: BatchArgs) -> Result<(), AppError> {
    let service = service_for(args.model.as_deref())?;
    let declarations = DeclarationBatch::from_path(&args.input)?;

    println!(
        "Screening {} declaration(s) from {}",
        declarations.len(),
        args.input.display()
    );
    screen_all(&service, declarations);
    Ok(())
}

pub(crate) fn run_tax(args: TaxArgs) -> Result<(), AppError> {
    let income = args.income;
    println!("Income: {}", format_inr(income));
    println!("Tax slab: {}", slab_of(income));
    println!("Tax due (incl. 4% cess): {}", format_inr(tax_on(income)));
    Ok(())
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let model = args.model.unwrap_or_else(demo_model_path);
    let service = service_for(Some(&model))?;

    println!("Income screening demo (model {})", model.display());
    screen_all(&service, demo_declarations());
    Ok(())
}

fn screen_all(service: &ScreeningService, declarations: Vec<TaxpayerDeclaration>) {
    for (index, declaration) in declarations.into_iter().enumerate() {
        let name = declaration.identity.full_name.clone();
        println!("\n#{} {}", index + 1, name);
        match service.screen(declaration) {
            Ok(report) => render_report(&report),
            Err(err) => println!("  Screening rejected: {err}"),
        }
    }
}

fn render_report(report: &ScreeningReport) {
    println!("  Occupation: {}", report.occupation);
    println!("  Income analysis");
    let estimate_note = if report.estimate.clamped {
        format!(" (model said {})", format_inr(report.estimate.raw_prediction))
    } else {
        String::new()
    };
    println!(
        "  - Predicted income: {}{}",
        format_inr(report.estimate.amount),
        estimate_note
    );
    println!("  - Reported income: {}", format_inr(report.reported_income));
    println!("  - Interest income: {}", format_inr(report.interest_income));
    println!("  - Capital gains: {}", format_inr(report.capital_gains));
    println!(
        "  - Total income: {}",
        format_inr(report.total_reported_income)
    );
    println!(
        "  Verdict: {} [{}]",
        report.verdict.summary(),
        report.verdict.color_hint
    );
    println!(
        "  Tax due: {} (slab {}) | on estimate: {} (slab {})",
        format_inr(report.tax_due),
        report.reported_slab,
        format_inr(report.estimated_tax_due),
        report.estimated_slab
    );
}

/// Rupee amount with thousands separators and two decimals.
fn format_inr(amount: f64) -> String {
    let fixed = format!("{:.2}", amount.abs());
    let (whole, fraction) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (index, digit) in whole.chars().enumerate() {
        if index > 0 && (whole.len() - index) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    let sign = if amount < 0.0 { "-" } else { "" };
    format!("{sign}₹{grouped}.{fraction}")
}

fn demo_declarations() -> Vec<TaxpayerDeclaration> {
    let identity = |name: &str, pan: &str| TaxpayerIdentity {
        full_name: name.to_string(),
        pan: pan.to_string(),
        aadhaar: "XXXX-XXXX-0000".to_string(),
        bank_account: "XXXXXX0000".to_string(),
    };

    vec![
        TaxpayerDeclaration {
            identity: identity("Meera Iyer", "AAAPI1234C"),
            age: 38,
            occupation: "Salaried".to_string(),
            marital_status: "Married".to_string(),
            children: "Yes".to_string(),
            reported_income: 720_000.0,
            interest_income: Some(18_000.0),
            capital_gains: None,
        },
        TaxpayerDeclaration {
            identity: identity("Rohan Das", "BBBPD5678K"),
            age: 26,
            occupation: "Business".to_string(),
            marital_status: "Single".to_string(),
            children: "No".to_string(),
            reported_income: 2_400_000.0,
            interest_income: None,
            capital_gains: Some(250_000.0),
        },
        TaxpayerDeclaration {
            identity: identity("Farah Khan", "CCCPK9012M"),
            age: 47,
            occupation: "Self-employed".to_string(),
            marital_status: "Married".to_string(),
            children: "Yes".to_string(),
            reported_income: 950_000.0,
            interest_income: Some(40_000.0),
            capital_gains: Some(60_000.0),
        },
        TaxpayerDeclaration {
            identity: identity("Arjun Nair", "DDDPN3456Q"),
            age: 33,
            occupation: "Freelancer".to_string(),
            marital_status: "Single".to_string(),
            children: "No".to_string(),
            reported_income: 500_000.0,
            interest_income: None,
            capital_gains: None,
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_inr_groups_thousands() {
        assert_eq!(format_inr(0.0), "₹0.00");
        assert_eq!(format_inr(13_000.0), "₹13,000.00");
        assert_eq!(format_inr(1_234_567.891), "₹1,234,567.89");
        assert_eq!(format_inr(-950.5), "-₹950.50");
    }

    #[test]
    fn bundled_demo_model_resolves_outside_the_workspace_root() {
        let path = demo_model_path();

        assert!(path.exists(), "missing demo model at {}", path.display());
        let handle = income_sentinel::workflows::screening::ModelHandle::from_path(&path)
            .expect("demo model loads");
        assert_eq!(handle.model_name().as_deref(), Some("demo-linear-v1"));
    }

    #[test]
    fn demo_declarations_cover_each_occupation() {
        let occupations: Vec<String> = demo_declarations()
            .into_iter()
            .map(|declaration| declaration.occupation)
            .collect();

        for expected in ["Salaried", "Self-employed", "Business"] {
            assert!(occupations.iter().any(|occupation| occupation == expected));
        }
    }
}
