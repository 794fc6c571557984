use crate::infra::load_profile_store;
use clap::Args;
use loan_engine::config::{AppConfig, ProfileStoreConfig};
use loan_engine::error::AppError;
use loan_engine::lending::{
    LoanApplication, LoanDecisionService, LoanDecisionView, ProductLimits,
};
use loan_engine::telemetry;
use rust_decimal::Decimal;
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Args, Debug)]
pub(crate) struct DecideArgs {
    /// Applicant identifier (personal code)
    #[arg(long)]
    pub(crate) applicant_id: String,
    /// Requested loan amount
    #[arg(long, value_parser = crate::infra::parse_amount)]
    pub(crate) amount: Decimal,
    /// Requested loan period in months
    #[arg(long)]
    pub(crate) period: i64,
    /// Credit record CSV to decide against (overrides LOAN_PROFILES_CSV)
    #[arg(long)]
    pub(crate) profiles_csv: Option<PathBuf>,
}

pub(crate) fn run_decide(args: DecideArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;
    telemetry::init(&config.telemetry)?;

    if let Some(path) = args.profiles_csv.clone() {
        config.profiles.csv_path = Some(path);
    }

    let view = decide_once(args, &config.profiles, config.product)?;
    let rendered = serde_json::to_string_pretty(&view).map_err(std::io::Error::from)?;
    println!("{rendered}");
    Ok(())
}

fn decide_once(
    args: DecideArgs,
    profiles: &ProfileStoreConfig,
    limits: ProductLimits,
) -> Result<LoanDecisionView, AppError> {
    let store = load_profile_store(profiles)?;
    let service = LoanDecisionService::new(Arc::new(store), limits);

    let decision = service.decide(LoanApplication {
        applicant_id: args.applicant_id,
        requested_amount: args.amount,
        requested_period_months: args.period,
    })?;

    Ok(decision.view())
}
