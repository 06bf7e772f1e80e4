// Candidate–job match scoring.
// Four independent calculators feed a weighted aggregator; the ranker applies it
// across many candidates or jobs. All reads go through `source::MatchDataSource`.

pub mod engine;
pub mod experience;
pub mod handlers;
pub mod location;
pub mod profile;
pub mod ranker;
pub mod salary;
pub mod score;
pub mod skills;
pub mod source;
pub mod weights;

#[cfg(test)]
pub mod fixtures;
