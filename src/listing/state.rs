// src/listing/state.rs

use std::fmt;
use std::str::FromStr;

/// Which overhaul-fund accounts to list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AccountType {
    #[default]
    Spec,
    Regop,
    All,
}

impl AccountType {
    pub const CHOICES: [AccountType; 3] = [AccountType::Spec, AccountType::Regop, AccountType::All];

    /// Form value, round-trips through `FromStr`.
    pub fn code(self) -> &'static str {
        match self {
            AccountType::Spec => "SPEC",
            AccountType::Regop => "REGOP",
            AccountType::All => "ALL",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            AccountType::Spec => "Спецсчёт",
            AccountType::Regop => "Счёт регоператора",
            AccountType::All => "Все",
        }
    }
}

impl FromStr for AccountType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "SPEC" => Ok(AccountType::Spec),
            "REGOP" => Ok(AccountType::Regop),
            "ALL" | "" => Ok(AccountType::All),
            other => Err(format!("unknown account type: {other}")),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortColumn {
    Address,
    Balance,
    Lifts,
    Date,
}

impl SortColumn {
    pub fn as_str(self) -> &'static str {
        match self {
            SortColumn::Address => "address",
            SortColumn::Balance => "balance",
            SortColumn::Lifts => "lifts",
            SortColumn::Date => "date",
        }
    }
}

impl FromStr for SortColumn {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "address" => Ok(SortColumn::Address),
            "balance" => Ok(SortColumn::Balance),
            "lifts" => Ok(SortColumn::Lifts),
            "date" => Ok(SortColumn::Date),
            other => Err(format!("unknown sort column: {other}")),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    Asc,
    Desc,
}

impl SortOrder {
    pub fn flipped(self) -> Self {
        match self {
            SortOrder::Asc => SortOrder::Desc,
            SortOrder::Desc => SortOrder::Asc,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            SortOrder::Asc => "asc",
            SortOrder::Desc => "desc",
        }
    }
}

/// Elevator-replacement years, kept in insertion order without duplicates.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct YearSet(Vec<i32>);

impl YearSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns false if the year was already present.
    pub fn insert(&mut self, year: i32) -> bool {
        if self.0.contains(&year) {
            return false;
        }
        self.0.push(year);
        true
    }

    pub fn contains(&self, year: i32) -> bool {
        self.0.contains(&year)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = i32> + '_ {
        self.0.iter().copied()
    }
}

impl FromIterator<i32> for YearSet {
    fn from_iter<I: IntoIterator<Item = i32>>(iter: I) -> Self {
        let mut set = YearSet::new();
        for year in iter {
            set.insert(year);
        }
        set
    }
}

impl fmt::Display for YearSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, year) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(",")?;
            }
            write!(f, "{year}")?;
        }
        Ok(())
    }
}

/// One change to the building listing state. Everything except `Page`
/// sends the user back to the first page.
#[derive(Debug, Clone, PartialEq)]
pub enum BuildingMutation {
    Page(u32),
    Search(String),
    AccountType(AccountType),
    MinBalance(f64),
    ReplacementYears(YearSet),
    Region(Option<String>),
    HasLifts(bool),
    Sort(SortColumn),
}

/// Filter, sort and pagination state of one building listing session.
/// Fields are only reachable through the mutation methods so the
/// page reset cannot be skipped.
#[derive(Debug, Clone, PartialEq)]
pub struct BuildingFilters {
    page: u32,
    search_text: String,
    account_type: AccountType,
    min_balance: f64,
    replacement_years: YearSet,
    region: Option<String>,
    sort_by: SortColumn,
    sort_order: SortOrder,
    has_lifts: bool,
}

impl Default for BuildingFilters {
    fn default() -> Self {
        Self {
            page: 1,
            search_text: String::new(),
            account_type: AccountType::Spec,
            min_balance: 0.0,
            replacement_years: YearSet::new(),
            region: None,
            sort_by: SortColumn::Balance,
            sort_order: SortOrder::Desc,
            has_lifts: true,
        }
    }
}

impl BuildingFilters {
    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn search_text(&self) -> &str {
        &self.search_text
    }

    pub fn account_type(&self) -> AccountType {
        self.account_type
    }

    pub fn min_balance(&self) -> f64 {
        self.min_balance
    }

    pub fn replacement_years(&self) -> &YearSet {
        &self.replacement_years
    }

    pub fn region(&self) -> Option<&str> {
        self.region.as_deref()
    }

    pub fn sort_by(&self) -> SortColumn {
        self.sort_by
    }

    pub fn sort_order(&self) -> SortOrder {
        self.sort_order
    }

    pub fn has_lifts(&self) -> bool {
        self.has_lifts
    }

    pub fn apply(&mut self, mutation: BuildingMutation) {
        match mutation {
            BuildingMutation::Page(page) => self.set_page(page),
            BuildingMutation::Search(text) => self.set_search_text(text),
            BuildingMutation::AccountType(t) => self.set_account_type(t),
            BuildingMutation::MinBalance(v) => self.set_min_balance(v),
            BuildingMutation::ReplacementYears(years) => self.set_replacement_years(years),
            BuildingMutation::Region(region) => self.set_region(region),
            BuildingMutation::HasLifts(v) => self.set_has_lifts(v),
            BuildingMutation::Sort(column) => self.handle_sort(column),
        }
    }

    /// Pages are 1-indexed; 0 is treated as 1.
    pub fn set_page(&mut self, page: u32) {
        self.page = page.max(1);
    }

    pub fn set_search_text(&mut self, text: impl Into<String>) {
        self.search_text = text.into();
        self.page = 1;
    }

    pub fn set_account_type(&mut self, account_type: AccountType) {
        self.account_type = account_type;
        self.page = 1;
    }

    /// Threshold in thousands. Callers parse and reject bad input.
    pub fn set_min_balance(&mut self, min_balance: f64) {
        self.min_balance = min_balance;
        self.page = 1;
    }

    pub fn set_replacement_years(&mut self, years: YearSet) {
        self.replacement_years = years;
        self.page = 1;
    }

    /// An empty region name means "no region filter".
    pub fn set_region(&mut self, region: Option<String>) {
        self.region = region.filter(|r| !r.trim().is_empty());
        self.page = 1;
    }

    pub fn set_has_lifts(&mut self, has_lifts: bool) {
        self.has_lifts = has_lifts;
        self.page = 1;
    }

    /// Clicking the active column flips its direction; any other column
    /// becomes active and always starts descending.
    pub fn handle_sort(&mut self, column: SortColumn) {
        if column == self.sort_by {
            self.sort_order = self.sort_order.flipped();
        } else {
            self.sort_by = column;
            self.sort_order = SortOrder::Desc;
        }
        self.page = 1;
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum CompanyMutation {
    Page(u32),
    Search(String),
}

/// Companies listing: search by name, OGRN or phone, plus pagination.
#[derive(Debug, Clone, PartialEq)]
pub struct CompanyFilters {
    page: u32,
    search_text: String,
}

impl Default for CompanyFilters {
    fn default() -> Self {
        Self {
            page: 1,
            search_text: String::new(),
        }
    }
}

impl CompanyFilters {
    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn search_text(&self) -> &str {
        &self.search_text
    }

    pub fn apply(&mut self, mutation: CompanyMutation) {
        match mutation {
            CompanyMutation::Page(page) => self.page = page.max(1),
            CompanyMutation::Search(text) => {
                self.search_text = text;
                self.page = 1;
            }
        }
    }
}
