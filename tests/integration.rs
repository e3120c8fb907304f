//! Integration tests for the payroll record keeper.
//!
//! This test suite drives the operations layer against real records files:
//! - Worked salary and tax examples
//! - Add / find / delete lifecycle
//! - Persistence round-trips and idempotent serialization
//! - Reports reading the last-saved state
//! - Configuration-driven tax rules
//! - Property checks over salary and tax

use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use proptest::prelude::*;
use rust_decimal::Decimal;

use payroll_records::calculation::TaxCalculator;
use payroll_records::config::{ConfigLoader, PayrollConfig};
use payroll_records::error::PayrollError;
use payroll_records::models::{Compensation, Employee, EmploymentType, ReportKind};
use payroll_records::operations::{CompensationRequest, NewEmployeeRequest, Payroll};
use payroll_records::store::{RecordStore, load_records, save_records};

// =============================================================================
// Test Helpers
// =============================================================================

fn dec(s: &str) -> Decimal {
    Decimal::from_str(s).unwrap()
}

fn config_for(dir: &Path) -> PayrollConfig {
    PayrollConfig {
        data_file: dir.join("employees.txt"),
        ..PayrollConfig::default()
    }
}

fn open_payroll(dir: &Path) -> Payroll {
    Payroll::open(&config_for(dir)).expect("Failed to open payroll")
}

fn request(id: &str, name: &str, compensation: CompensationRequest) -> NewEmployeeRequest {
    NewEmployeeRequest {
        employee_id: id.to_string(),
        name: name.to_string(),
        address: "1 Main Street".to_string(),
        contact_details: "555-0100".to_string(),
        compensation,
    }
}

fn write_config(dir: &Path, body: &str) -> PathBuf {
    let path = dir.join("payroll.yaml");
    fs::write(&path, body).unwrap();
    path
}

// =============================================================================
// Worked Examples
// =============================================================================

#[test]
fn test_full_time_example_with_bracket_and_deduction() {
    let dir = tempfile::tempdir().unwrap();
    let config_path = write_config(
        dir.path(),
        "tax:\n  brackets:\n    - threshold: \"50000\"\n      rate: \"0.05\"\n  deductions:\n    std: \"200\"\n",
    );
    let config = ConfigLoader::load(&config_path).unwrap().into_config();
    let mut payroll = Payroll::open(&config).unwrap();

    payroll
        .add_employee(request("E1", "Ada", CompensationRequest::full_time("60000")))
        .unwrap();

    assert_eq!(payroll.compute_salary("E1").unwrap(), dec("5000"));
    assert_eq!(payroll.compute_tax("E1").unwrap(), dec("9300"));
    assert_eq!(
        payroll.store().path(),
        dir.path().join("employees.txt").as_path()
    );
}

#[test]
fn test_part_time_example_without_rules() {
    let dir = tempfile::tempdir().unwrap();
    let mut payroll = open_payroll(dir.path());

    payroll
        .add_employee(request("E2", "Charles", CompensationRequest::part_time("20", "100")))
        .unwrap();

    assert_eq!(payroll.compute_salary("E2").unwrap(), dec("2000"));
    assert_eq!(payroll.compute_tax("E2").unwrap(), dec("4800"));
}

// =============================================================================
// Lifecycle
// =============================================================================

#[test]
fn test_empty_storage_yields_empty_store() {
    let dir = tempfile::tempdir().unwrap();
    let payroll = open_payroll(dir.path());
    assert!(payroll.store().is_empty());
}

#[test]
fn test_add_then_find_returns_record_unchanged() {
    let dir = tempfile::tempdir().unwrap();
    let mut store = RecordStore::open(dir.path().join("employees.txt")).unwrap();
    let employee = Employee::new(
        "E1",
        "Ada Lovelace",
        "12 St James Square",
        "ada@example.com",
        Compensation::full_time(dec("60000")).unwrap(),
    )
    .unwrap();

    store.add(employee.clone()).unwrap();

    assert_eq!(store.find_by_id("E1"), Some(&employee));
}

#[test]
fn test_duplicate_add_is_rejected_and_file_unchanged() {
    let dir = tempfile::tempdir().unwrap();
    let mut payroll = open_payroll(dir.path());
    payroll
        .add_employee(request("E1", "Ada", CompensationRequest::full_time("60000")))
        .unwrap();
    let before = fs::read(payroll.store().path()).unwrap();

    let err = payroll
        .add_employee(request("E1", "Imposter", CompensationRequest::full_time("1")))
        .unwrap_err();

    assert!(matches!(err, PayrollError::DuplicateId { .. }));
    assert_eq!(fs::read(payroll.store().path()).unwrap(), before);
}

#[test]
fn test_delete_then_lookup_is_not_found() {
    let dir = tempfile::tempdir().unwrap();
    let mut payroll = open_payroll(dir.path());
    payroll
        .add_employee(request("E1", "Ada", CompensationRequest::full_time("60000")))
        .unwrap();

    payroll.delete_employee_record("E1").unwrap();

    assert!(payroll.compute_salary("E1").unwrap_err().is_not_found());
    assert!(payroll.delete_employee_record("E1").unwrap_err().is_not_found());
}

#[test]
fn test_delete_missing_id_does_not_touch_store() {
    let dir = tempfile::tempdir().unwrap();
    let mut payroll = open_payroll(dir.path());
    payroll
        .add_employee(request("E1", "Ada", CompensationRequest::full_time("60000")))
        .unwrap();

    assert!(payroll.delete_employee_record("nobody").unwrap_err().is_not_found());
    assert_eq!(payroll.store().len(), 1);
}

#[test]
fn test_changes_survive_reopen() {
    let dir = tempfile::tempdir().unwrap();
    {
        let mut payroll = open_payroll(dir.path());
        payroll
            .add_employee(request("E1", "Ada", CompensationRequest::full_time("60000")))
            .unwrap();
        payroll
            .add_employee(request("E2", "Charles", CompensationRequest::part_time("20", "100")))
            .unwrap();
        payroll
            .update_employee_record("E1", "contact_details", "ada@example.org")
            .unwrap();
        payroll
            .change_employment_type("E2", CompensationRequest::full_time("36000"))
            .unwrap();
    }

    let payroll = open_payroll(dir.path());
    let ada = payroll.view_employee_information("E1").unwrap();
    let charles = payroll.view_employee_information("E2").unwrap();

    assert_eq!(ada.contact_details, "ada@example.org");
    assert_eq!(charles.employment_type, EmploymentType::FullTime);
    assert_eq!(charles.monthly_salary, dec("3000"));
}

#[test]
fn test_employment_type_update_without_figures_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let mut payroll = open_payroll(dir.path());
    payroll
        .add_employee(request("E1", "Ada", CompensationRequest::full_time("60000")))
        .unwrap();

    let err = payroll
        .update_employee_record("E1", "employment_type", "Part-time")
        .unwrap_err();

    assert!(matches!(err, PayrollError::InvalidInput { .. }));
    let reopened = open_payroll(dir.path());
    assert_eq!(
        reopened.view_employee_information("E1").unwrap().employment_type,
        EmploymentType::FullTime
    );
}

#[test]
fn test_unknown_attribute_update_is_accepted_and_ignored() {
    let dir = tempfile::tempdir().unwrap();
    let mut payroll = open_payroll(dir.path());
    payroll
        .add_employee(request("E1", "Ada", CompensationRequest::full_time("60000")))
        .unwrap();
    let before = payroll.view_employee_information("E1").unwrap();

    payroll
        .update_employee_record("E1", "favourite_colour", "green")
        .unwrap();

    assert_eq!(payroll.view_employee_information("E1").unwrap(), before);
}

// =============================================================================
// Persistence
// =============================================================================

#[test]
fn test_records_written_in_documented_format() {
    let dir = tempfile::tempdir().unwrap();
    let mut payroll = open_payroll(dir.path());
    payroll
        .add_employee(request("E1", "Ada", CompensationRequest::full_time("60000")))
        .unwrap();
    payroll
        .add_employee(request("E2", "Charles", CompensationRequest::part_time("20", "100")))
        .unwrap();

    let content = fs::read_to_string(dir.path().join("employees.txt")).unwrap();
    assert_eq!(
        content,
        "E1,Ada,1 Main Street,555-0100,Full-time,60000\n\
         E2,Charles,1 Main Street,555-0100,Part-time,20,100\n"
    );
}

#[test]
fn test_save_of_load_is_idempotent() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("employees.txt");
    fs::write(
        &path,
        "E1,Ada,Addr,Contact,Full-time,60000.0\n\nE2,Bob,Addr,Contact,Part-time,19.75,86.5\n",
    )
    .unwrap();

    save_records(&path, &load_records(&path).unwrap()).unwrap();
    let first = fs::read(&path).unwrap();
    save_records(&path, &load_records(&path).unwrap()).unwrap();
    let second = fs::read(&path).unwrap();

    assert_eq!(first, second);
    assert_eq!(
        String::from_utf8(first).unwrap(),
        "E1,Ada,Addr,Contact,Full-time,60000.0\nE2,Bob,Addr,Contact,Part-time,19.75,86.5\n"
    );
}

#[test]
fn test_malformed_file_fails_to_open() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(
        dir.path().join("employees.txt"),
        "E1,Ada,Addr,Contact,Full-time,60000\nE2,Bob,Addr,Contact,Freelance,10\n",
    )
    .unwrap();

    match Payroll::open(&config_for(dir.path())) {
        Err(PayrollError::MalformedRecord { line, message }) => {
            assert_eq!(line, 2);
            assert!(message.contains("Freelance"));
        }
        other => panic!("Expected MalformedRecord, got {:?}", other.map(|_| ())),
    }
}

// =============================================================================
// Reports
// =============================================================================

#[test]
fn test_employee_list_report_output() {
    let dir = tempfile::tempdir().unwrap();
    let mut payroll = open_payroll(dir.path());
    payroll
        .add_employee(request("E1", "Ada", CompensationRequest::full_time("60000")))
        .unwrap();
    payroll
        .add_employee(request("E2", "Charles", CompensationRequest::part_time("20", "100")))
        .unwrap();

    let report = payroll.generate_report(ReportKind::EmployeeList).unwrap();

    assert_eq!(
        report.to_string(),
        "Employee List:\nAda (E1) - Full-time\nCharles (E2) - Part-time\n"
    );
}

#[test]
fn test_tax_report_output() {
    let dir = tempfile::tempdir().unwrap();
    let mut payroll = open_payroll(dir.path());
    payroll
        .add_employee(request("E1", "Ada", CompensationRequest::full_time("50000")))
        .unwrap();

    let report = payroll.generate_report(ReportKind::TaxReport).unwrap();

    assert_eq!(report.to_string(), "Tax Report:\nAda (E1) - Tax Amount: $7500\n");
}

#[test]
fn test_report_sees_other_handle_writes() {
    let dir = tempfile::tempdir().unwrap();
    let mut reader = open_payroll(dir.path());
    let mut writer = open_payroll(dir.path());

    writer
        .add_employee(request("E7", "Grace", CompensationRequest::part_time("40", "10")))
        .unwrap();
    assert!(reader.compute_salary("E7").unwrap_err().is_not_found());

    let report = reader.generate_report(ReportKind::TaxReport).unwrap();

    assert_eq!(report.lines.len(), 1);
    assert_eq!(report.lines[0].tax_amount, Some(dec("960")));
    assert_eq!(reader.compute_salary("E7").unwrap(), dec("400"));
}

// =============================================================================
// Properties
// =============================================================================

fn amount() -> impl Strategy<Value = Decimal> {
    (0i64..=100_000_000_00i64, 0u32..=2).prop_map(|(units, scale)| Decimal::new(units, scale))
}

fn rate() -> impl Strategy<Value = Decimal> {
    (0i64..=100i64).prop_map(|pct| Decimal::new(pct, 2))
}

fn compensation() -> impl Strategy<Value = Compensation> {
    prop_oneof![
        amount().prop_map(|annual_salary| Compensation::FullTime { annual_salary }),
        (amount(), amount()).prop_map(|(hourly_rate, hours_worked_per_month)| {
            Compensation::PartTime {
                hourly_rate,
                hours_worked_per_month,
            }
        }),
    ]
}

fn calculator() -> impl Strategy<Value = TaxCalculator> {
    (
        prop::collection::vec((amount(), rate()), 0..4),
        prop::collection::vec(amount(), 0..4),
    )
        .prop_map(|(brackets, deductions)| {
            let calculator = brackets
                .into_iter()
                .fold(TaxCalculator::new(), |c, (t, r)| c.with_bracket(t, r));
            deductions
                .into_iter()
                .enumerate()
                .fold(calculator, |c, (i, d)| c.with_deduction(format!("d{}", i), d))
        })
}

fn employee_with(compensation: Compensation) -> Employee {
    Employee::new("P1", "Prop", "Addr", "Contact", compensation).unwrap()
}

proptest! {
    #[test]
    fn prop_tax_is_never_negative(compensation in compensation(), calculator in calculator()) {
        let employee = employee_with(compensation);
        prop_assert!(calculator.compute_tax(&employee) >= Decimal::ZERO);
    }

    #[test]
    fn prop_full_time_monthly_is_annual_over_twelve(salary in amount()) {
        let employee = employee_with(Compensation::full_time(salary).unwrap());
        let monthly = employee.compute_monthly_salary();
        prop_assert!((monthly * Decimal::from(12) - salary).abs() < dec("0.000000001"));
    }

    #[test]
    fn prop_part_time_monthly_is_rate_times_hours(rate in amount(), hours in amount()) {
        let employee = employee_with(Compensation::part_time(rate, hours).unwrap());
        prop_assert_eq!(employee.compute_monthly_salary(), rate * hours);
    }

    #[test]
    fn prop_tax_without_rules_is_base_rate(compensation in compensation()) {
        let employee = employee_with(compensation);
        let breakdown = TaxCalculator::new().breakdown(&employee);
        prop_assert_eq!(breakdown.tax, breakdown.taxable_income * breakdown.base_rate);
    }
}
