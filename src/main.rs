//! Interactive payroll shell.
//!
//! Usage: `payroll [CONFIG.yaml]`. The config path may also be given through
//! `PAYROLL_CONFIG`. Without one, records are kept in `./employees.txt` and
//! tax uses the base rates only.

use std::env;
use std::io::{self, BufRead, Write};
use std::process::ExitCode;

use payroll_records::config::ConfigLoader;
use payroll_records::error::PayrollResult;
use payroll_records::models::{EmploymentType, RecordAttribute, ReportKind, format_amount};
use payroll_records::operations::{
    CompensationRequest, NewEmployeeRequest, Payroll,
};
use tracing::error;
use tracing_subscriber::EnvFilter;

const MENU: &str = "\nPayroll and HRIS System
1. Add New Employee
2. Update Employee Record
3. Change Employment Type
4. Delete Employee Record
5. Compute Salary
6. Compute Taxes
7. View Employee Information
8. Generate Reports
9. Exit";

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let config_path = env::args().nth(1).or_else(|| env::var("PAYROLL_CONFIG").ok());

    let mut payroll = match ConfigLoader::load_or_default(config_path.as_deref())
        .and_then(|loader| Payroll::open(loader.config()))
    {
        Ok(payroll) => payroll,
        Err(err) => {
            error!(error = %err, "Failed to start payroll");
            eprintln!("{}", err);
            return ExitCode::FAILURE;
        }
    };

    let stdin = io::stdin();
    let mut shell = Shell {
        input: stdin.lock(),
    };

    loop {
        println!("{}", MENU);
        let Some(option) = shell.prompt("Please select an option (1-9): ") else {
            break;
        };

        let outcome = match option.as_str() {
            "1" => shell.add_employee(&mut payroll),
            "2" => shell.update_employee(&mut payroll),
            "3" => shell.change_employment_type(&mut payroll),
            "4" => shell.delete_employee(&mut payroll),
            "5" => shell.compute_salary(&payroll),
            "6" => shell.compute_tax(&payroll),
            "7" => shell.view_employee(&payroll),
            "8" => shell.generate_report(&mut payroll),
            "9" => {
                println!("Exiting Payroll and HRIS System. Goodbye!");
                break;
            }
            _ => {
                println!("Invalid option. Please choose a number between 1 and 9.");
                Ok(())
            }
        };

        if let Err(err) = outcome {
            println!("{}", err);
        }
    }

    ExitCode::SUCCESS
}

/// Reads prompted answers from a line source.
struct Shell<R> {
    input: R,
}

impl<R: BufRead> Shell<R> {
    /// Prints `label` and reads one trimmed line. `None` at end of input.
    fn prompt(&mut self, label: &str) -> Option<String> {
        print!("{}", label);
        let _ = io::stdout().flush();

        let mut line = String::new();
        match self.input.read_line(&mut line) {
            Ok(0) | Err(_) => None,
            Ok(_) => Some(line.trim().to_string()),
        }
    }

    fn answer(&mut self, label: &str) -> String {
        self.prompt(label).unwrap_or_default()
    }

    fn compensation(&mut self, employment_type: String) -> CompensationRequest {
        let mut request = CompensationRequest {
            employment_type,
            ..CompensationRequest::default()
        };
        match request.employment_type.parse::<EmploymentType>() {
            Ok(EmploymentType::FullTime) => {
                request.annual_salary = Some(self.answer("Annual Salary: "));
            }
            Ok(EmploymentType::PartTime) => {
                request.hourly_rate = Some(self.answer("Hourly Rate: "));
                request.hours_worked_per_month = Some(self.answer("Hours Worked Per Month: "));
            }
            // Left for the request conversion to report.
            Err(_) => {}
        }
        request
    }

    fn add_employee(&mut self, payroll: &mut Payroll) -> PayrollResult<()> {
        let employee_id = self.answer("Enter Employee ID: ");
        let name = self.answer("Name: ");
        let address = self.answer("Address: ");
        let contact_details = self.answer("Contact Details: ");
        let employment_type = self.answer("Employment Type (Full-time/Part-time): ");
        let compensation = self.compensation(employment_type);

        let confirmation = payroll.add_employee(NewEmployeeRequest {
            employee_id,
            name,
            address,
            contact_details,
            compensation,
        })?;
        println!("{}", confirmation);
        Ok(())
    }

    fn update_employee(&mut self, payroll: &mut Payroll) -> PayrollResult<()> {
        let employee_id = self.answer("Enter Employee ID: ");
        let choice = self.answer(
            "Choose Attribute to Update:\n1. Name\n2. Address\n3. Contact Details\n4. Employment Type\nEnter Option: ",
        );
        let attribute = match choice.as_str() {
            "1" => RecordAttribute::Name.name(),
            "2" => RecordAttribute::Address.name(),
            "3" => RecordAttribute::ContactDetails.name(),
            "4" => RecordAttribute::EmploymentType.name(),
            other => other,
        }
        .to_string();
        let new_value = self.answer("Enter New Value: ");

        let confirmation = payroll.update_employee_record(&employee_id, &attribute, &new_value)?;
        println!("{}", confirmation);
        Ok(())
    }

    fn change_employment_type(&mut self, payroll: &mut Payroll) -> PayrollResult<()> {
        let employee_id = self.answer("Enter Employee ID: ");
        payroll.view_employee_information(&employee_id)?;
        let employment_type = self.answer("New Employment Type (Full-time/Part-time): ");
        let compensation = self.compensation(employment_type);

        let confirmation = payroll.change_employment_type(&employee_id, compensation)?;
        println!("{}", confirmation);
        Ok(())
    }

    fn delete_employee(&mut self, payroll: &mut Payroll) -> PayrollResult<()> {
        let employee_id = self.answer("Enter Employee ID: ");
        let confirmation = payroll.delete_employee_record(&employee_id)?;
        println!("{}", confirmation);
        Ok(())
    }

    fn compute_salary(&mut self, payroll: &Payroll) -> PayrollResult<()> {
        let employee_id = self.answer("Enter Employee ID: ");
        let salary = payroll.compute_salary(&employee_id)?;
        println!("Monthly Salary: {}", format_amount(salary));
        Ok(())
    }

    fn compute_tax(&mut self, payroll: &Payroll) -> PayrollResult<()> {
        let employee_id = self.answer("Enter Employee ID: ");
        let tax = payroll.compute_tax(&employee_id)?;
        println!("Tax Amount: {}", format_amount(tax));
        Ok(())
    }

    fn view_employee(&mut self, payroll: &Payroll) -> PayrollResult<()> {
        let employee_id = self.answer("Enter Employee ID: ");
        println!("{}", payroll.view_employee_information(&employee_id)?);
        Ok(())
    }

    fn generate_report(&mut self, payroll: &mut Payroll) -> PayrollResult<()> {
        println!("Generate Reports\n1. Employee List\n2. Tax Report");
        let kind = match self.answer("Enter an option: ").as_str() {
            "1" => ReportKind::EmployeeList,
            "2" => ReportKind::TaxReport,
            _ => {
                println!("Invalid option.");
                return Ok(());
            }
        };
        print!("{}", payroll.generate_report(kind)?);
        Ok(())
    }
}
