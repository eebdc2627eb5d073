//! In-memory customer service for view-model tests.

use std::collections::HashMap;
use std::sync::Mutex;

use banking_console_core::{CustomerId, HIGH_INCOME_THRESHOLD, Income, SortField, SortOrder};

use crate::banking::{
    BankingError, Customer, CustomerService, CustomerUpdate, FullRegistration, Invalidation,
    MutationOutcome, SimpleRegistration,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Op {
    ListAll,
    ListSorted,
    ListActive,
    ListHighIncome,
    GetById,
    CreateSimple,
    CreateFull,
    Update,
    Deactivate,
}

/// Canned failure for one operation.
#[derive(Debug, Clone)]
pub enum Failure {
    Server(Option<&'static str>),
    Validation(Option<&'static str>),
    NotFound,
    /// Never answers.
    Hang,
}

impl Failure {
    fn to_error(&self) -> BankingError {
        match self {
            Self::Server(message) => BankingError::Server {
                status: 500,
                message: message.map(String::from),
            },
            Self::Validation(message) => BankingError::Validation(message.map(String::from)),
            Self::NotFound | Self::Hang => BankingError::NotFound("/search".to_string()),
        }
    }
}

#[derive(Default)]
pub struct FakeService {
    customers: Mutex<Vec<Customer>>,
    failures: Mutex<HashMap<Op, Failure>>,
    calls: Mutex<Vec<Op>>,
    simple_requests: Mutex<Vec<SimpleRegistration>>,
}

pub fn customer(id: i64, name: &str, income: u64, active: bool) -> Customer {
    Customer {
        id: CustomerId::new(id),
        name: name.to_string(),
        email: format!("{}@bank.example", name.to_lowercase()),
        phone_number: None,
        address: "1 Main St".to_string(),
        city: "Pune".to_string(),
        country: "India".to_string(),
        income: Some(Income::new(income)),
        age: None,
        active,
        date: None,
        date_of_birth: None,
    }
}

#[allow(clippy::unwrap_used)]
impl FakeService {
    pub fn with_customers(customers: Vec<Customer>) -> Self {
        Self {
            customers: Mutex::new(customers),
            ..Self::default()
        }
    }

    pub fn fail(self, op: Op, failure: Failure) -> Self {
        self.failures.lock().unwrap().insert(op, failure);
        self
    }

    pub fn calls(&self, op: Op) -> usize {
        self.calls.lock().unwrap().iter().filter(|c| **c == op).count()
    }

    pub fn customers(&self) -> Vec<Customer> {
        self.customers.lock().unwrap().clone()
    }

    pub fn simple_requests(&self) -> Vec<SimpleRegistration> {
        self.simple_requests.lock().unwrap().clone()
    }

    async fn record(&self, op: Op) -> Result<(), BankingError> {
        self.calls.lock().unwrap().push(op);
        let failure = self.failures.lock().unwrap().get(&op).cloned();
        match failure {
            Some(Failure::Hang) => std::future::pending().await,
            Some(failure) => Err(failure.to_error()),
            None => Ok(()),
        }
    }

    fn filtered(&self, keep: impl Fn(&Customer) -> bool) -> Vec<Customer> {
        self.customers
            .lock()
            .unwrap()
            .iter()
            .filter(|c| keep(c))
            .cloned()
            .collect()
    }

    fn insert(&self, mut customer: Customer) -> Customer {
        let mut customers = self.customers.lock().unwrap();
        let next = customers.iter().map(|c| c.id.as_i64()).max().unwrap_or(0) + 1;
        customer.id = CustomerId::new(next);
        customers.push(customer.clone());
        customer
    }
}

#[allow(clippy::unwrap_used)]
impl CustomerService for FakeService {
    async fn list_all(&self) -> Result<Vec<Customer>, BankingError> {
        self.record(Op::ListAll).await?;
        Ok(self.customers())
    }

    async fn list_sorted(
        &self,
        sort_by: SortField,
        order: SortOrder,
    ) -> Result<Vec<Customer>, BankingError> {
        self.record(Op::ListSorted).await?;
        let mut customers = self.customers();
        customers.sort_by(|a, b| match sort_by {
            SortField::Name => a.name.cmp(&b.name),
            SortField::Income => a.income_or_zero().cmp(&b.income_or_zero()),
            SortField::Id => a.id.cmp(&b.id),
            SortField::Email => a.email.cmp(&b.email),
        });
        if order == SortOrder::Desc {
            customers.reverse();
        }
        Ok(customers)
    }

    async fn list_active(&self) -> Result<Vec<Customer>, BankingError> {
        self.record(Op::ListActive).await?;
        Ok(self.filtered(|c| c.active))
    }

    async fn list_high_income(&self) -> Result<Vec<Customer>, BankingError> {
        self.record(Op::ListHighIncome).await?;
        Ok(self.filtered(|c| c.income_or_zero() > HIGH_INCOME_THRESHOLD))
    }

    async fn get_by_id(&self, id: CustomerId) -> Result<Customer, BankingError> {
        self.record(Op::GetById).await?;
        self.filtered(|c| c.id == id)
            .into_iter()
            .next()
            .ok_or_else(|| BankingError::NotFound(format!("/search/{id}")))
    }

    async fn create_simple(
        &self,
        registration: &SimpleRegistration,
    ) -> Result<MutationOutcome<Customer>, BankingError> {
        self.simple_requests
            .lock()
            .unwrap()
            .push(registration.clone());
        self.record(Op::CreateSimple).await?;

        let details = &registration.details;
        let mut created = customer(0, &details.name, details.income.amount(), true);
        created.date = Some(registration.date);
        Ok(MutationOutcome {
            record: self.insert(created),
            invalidation: Invalidation::CustomerLists,
        })
    }

    async fn create_full(
        &self,
        registration: &FullRegistration,
    ) -> Result<MutationOutcome<Customer>, BankingError> {
        self.record(Op::CreateFull).await?;

        let details = &registration.details;
        let mut created = customer(0, &details.name, details.income.amount(), true);
        created.date_of_birth = Some(registration.date_of_birth);
        Ok(MutationOutcome {
            record: self.insert(created),
            invalidation: Invalidation::CustomerLists,
        })
    }

    async fn update(
        &self,
        id: CustomerId,
        update: &CustomerUpdate,
    ) -> Result<MutationOutcome<Customer>, BankingError> {
        self.record(Op::Update).await?;

        let mut customers = self.customers.lock().unwrap();
        let target = customers
            .iter_mut()
            .find(|c| c.id == id)
            .ok_or_else(|| BankingError::NotFound(format!("/update/{id}")))?;
        if let Some(name) = &update.name {
            target.name.clone_from(name);
        }
        if let Some(city) = &update.city {
            target.city.clone_from(city);
        }
        if let Some(income) = update.income {
            target.income = Some(income);
        }
        Ok(MutationOutcome {
            record: target.clone(),
            invalidation: Invalidation::Customer(id),
        })
    }

    async fn deactivate(&self, id: CustomerId) -> Result<MutationOutcome<()>, BankingError> {
        self.record(Op::Deactivate).await?;

        let mut customers = self.customers.lock().unwrap();
        let target = customers
            .iter_mut()
            .find(|c| c.id == id)
            .ok_or_else(|| BankingError::NotFound(format!("/deactive/{id}")))?;
        target.active = false;
        Ok(MutationOutcome {
            record: (),
            invalidation: Invalidation::Customer(id),
        })
    }
}
