/// quick start - quote a single loan and the default lease matrix
use vehicle_financing_rs::{CalculationType, Decimal, FinancingCalculator, FinancingRequest};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let calculator = FinancingCalculator::new();

    // $30,000 vehicle, $3,000 down, 5.9% over 60 months
    let loan = FinancingRequest {
        vehicle_price: Decimal::from(30_000),
        down_payment: Some(Decimal::from(3_000)),
        loan_apr: Some("5.9".parse()?),
        loan_term_months: Some(Decimal::from(60)),
        calculation_type: CalculationType::Loan,
        ..Default::default()
    };
    let quote = calculator.compute(&loan)?;
    println!("{}", serde_json::to_string_pretty(&quote)?);

    // price only: every default loan and lease option, plus the comparison
    let both = calculator.compute(&FinancingRequest::for_price(Decimal::from(30_000)))?;
    if let Some(comparison) = &both.comparison {
        println!("{}", comparison.recommendation);
    }

    Ok(())
}
