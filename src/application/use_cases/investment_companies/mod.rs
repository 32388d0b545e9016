pub mod manage_investment_companies;
