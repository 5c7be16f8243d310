//! Progress reporting for evolutionary runs.
//!
//! After every generation the [`GeneticAlgorithm`] driver hands
//! a [`Generation`] report to an [`Observer`]. Observers are
//! provided for in-memory logging ([`EvolutionLogger`]) and
//! for printing the classic tabular report ([`TableReporter`]);
//! closures can be wrapped in an [`FnObserver`].
//!
//! [`GeneticAlgorithm`]: crate::GeneticAlgorithm
use crate::{Chromosome, Genotype};

use std::fmt;
use std::io;

/// Defines different possible reporting levels for logging.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ReportingLevel {
    /// Clones the entire population.
    AllGenomes,
    /// Clones only the generation's champion.
    Champion,
    /// Clones no genomes.
    NoGenomes,
}

/// The state of a run after one generation.
#[derive(Clone, Copy, Debug)]
pub struct Generation<'a> {
    /// Generation index; 0 is the initial random population.
    pub generation: usize,
    /// Chromosomes of the generation, sorted by ascending fitness.
    pub members: &'a [Chromosome],
}

impl<'a> Generation<'a> {
    /// Returns the fittest chromosome.
    ///
    /// # Panics
    /// Panics if `members` is empty.
    pub fn best(&self) -> &'a Chromosome {
        &self.members[0]
    }

    /// Returns the lowest fitness in the generation.
    pub fn best_fitness(&self) -> f64 {
        self.best().fitness()
    }

    /// Returns the mean fitness of the generation.
    pub fn average_fitness(&self) -> f64 {
        self.members.iter().map(Chromosome::fitness).sum::<f64>() / self.members.len() as f64
    }

    /// Returns the genotype of the fittest chromosome.
    pub fn best_genotype(&self) -> &'a Genotype {
        self.best().genotype()
    }
}

/// Receives a report after every generation of a run.
pub trait Observer {
    fn observe(&mut self, report: &Generation<'_>);
}

impl Observer for () {
    fn observe(&mut self, _: &Generation<'_>) {}
}

/// An observer calling a closure on every report.
pub struct FnObserver<F>(F);

impl<F> FnObserver<F>
where
    F: FnMut(&Generation<'_>),
{
    pub fn new(f: F) -> FnObserver<F> {
        FnObserver(f)
    }
}

impl<F> Observer for FnObserver<F>
where
    F: FnMut(&Generation<'_>),
{
    fn observe(&mut self, report: &Generation<'_>) {
        (self.0)(report)
    }
}

/// A struct for reporting basic statistical data.
#[derive(Clone, Debug, PartialEq)]
pub struct Stats {
    pub maximum: f64,
    pub minimum: f64,
    pub mean: f64,
    pub median: f64,
}

impl Stats {
    /// Returns statistics about numbers in a sequence.
    /// All statistics of an empty sequence are NaN.
    ///
    /// # Examples
    /// ```
    /// use oxibga::logging::Stats;
    ///
    /// let stats = Stats::from([-2.0, -1.0, 0.5, 1.0, 1.5].iter().copied());
    /// assert_eq!(stats.maximum, 1.5);
    /// assert_eq!(stats.minimum, -2.0);
    /// assert_eq!(stats.mean, 0.0);
    /// assert_eq!(stats.median, 0.5);
    /// ```
    pub fn from(data: impl Iterator<Item = f64>) -> Stats {
        let mut data: Vec<f64> = data.collect();
        if data.is_empty() {
            return Stats {
                maximum: f64::NAN,
                minimum: f64::NAN,
                mean: f64::NAN,
                median: f64::NAN,
            };
        }
        data.sort_unstable_by(f64::total_cmp);
        let mid = data.len() / 2;
        let median = if data.len() % 2 == 0 {
            (data[mid - 1] + data[mid]) / 2.0
        } else {
            data[mid]
        };
        Stats {
            maximum: data[data.len() - 1],
            minimum: data[0],
            mean: data.iter().sum::<f64>() / data.len() as f64,
            median,
        }
    }
}

/// A reporting-level dependant store
/// of genotypes from a generation.
#[derive(Clone, Debug, PartialEq)]
pub enum GenerationMemberRecord {
    /// Every chromosome of the generation.
    All(Vec<Chromosome>),
    /// Only the generation's champion.
    Champion(Chromosome),
    /// Empty.
    None,
}

/// A snapshot of a generation.
#[derive(Clone, Debug, PartialEq)]
pub struct Log {
    pub generation_number: usize,
    pub generation_sample: GenerationMemberRecord,
    pub best_fitness: f64,
    pub average_fitness: f64,
    pub fitness: Stats,
}

impl fmt::Display for Log {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Log {{\n\
            \tgeneration_number: {:?}\n\
            \tbest_fitness: {:?}\n\
            \taverage_fitness: {:?}\n\
            \tfitness: {:?}\n\
            }}",
            &self.generation_number, &self.best_fitness, &self.average_fitness, &self.fitness,
        )
    }
}

/// A log of the evolution of a population over time.
#[derive(Clone, Debug)]
pub struct EvolutionLogger {
    reporting_level: ReportingLevel,
    logs: Vec<Log>,
}

impl EvolutionLogger {
    /// Returns a logger with the appropiate reporting level.
    ///
    /// # Examples
    /// ```
    /// use oxibga::logging::{EvolutionLogger, ReportingLevel};
    ///
    /// let logger = EvolutionLogger::new(ReportingLevel::NoGenomes);
    /// assert_eq!(logger.iter().count(), 0);
    /// ```
    pub fn new(reporting_level: ReportingLevel) -> EvolutionLogger {
        EvolutionLogger {
            reporting_level,
            logs: vec![],
        }
    }

    /// Store a snapshot of a generation.
    pub fn log(&mut self, report: &Generation<'_>) {
        self.logs.push(Log {
            generation_number: report.generation,
            generation_sample: match self.reporting_level {
                ReportingLevel::AllGenomes => GenerationMemberRecord::All(report.members.to_vec()),
                ReportingLevel::Champion => GenerationMemberRecord::Champion(report.best().clone()),
                ReportingLevel::NoGenomes => GenerationMemberRecord::None,
            },
            best_fitness: report.best_fitness(),
            average_fitness: report.average_fitness(),
            fitness: Stats::from(report.members.iter().map(Chromosome::fitness)),
        })
    }

    /// Iterate over all logged snapshots.
    pub fn iter(&self) -> impl Iterator<Item = &Log> {
        self.logs.iter()
    }
}

impl Observer for EvolutionLogger {
    fn observe(&mut self, report: &Generation<'_>) {
        self.log(report)
    }
}

/// Prints one row per generation to a writer:
/// generation index, best fitness, average fitness
/// and the best genotype, preceded by a header row.
///
/// Write errors stop further output; the first one
/// is returned by [`finish`](TableReporter::finish).
#[derive(Debug)]
pub struct TableReporter<W> {
    writer: W,
    header_written: bool,
    error: Option<io::Error>,
}

impl<W: io::Write> TableReporter<W> {
    pub fn new(writer: W) -> TableReporter<W> {
        TableReporter {
            writer,
            header_written: false,
            error: None,
        }
    }

    fn write_row(&mut self, report: &Generation<'_>) -> io::Result<()> {
        if !self.header_written {
            writeln!(
                self.writer,
                "{:>6}\t{:>15}\t{:>15}\tGenotype",
                "Gen", "Min", "Avg"
            )?;
            self.header_written = true;
        }
        writeln!(
            self.writer,
            "{:>6}\t{:>15.8}\t{:>15.8}\t{}",
            report.generation,
            report.best_fitness(),
            report.average_fitness(),
            report.best_genotype()
        )
    }

    /// Flushes and returns the writer, or the first
    /// write error encountered.
    pub fn finish(mut self) -> io::Result<W> {
        if let Some(e) = self.error.take() {
            return Err(e);
        }
        self.writer.flush()?;
        Ok(self.writer)
    }
}

impl<W: io::Write> Observer for TableReporter<W> {
    fn observe(&mut self, report: &Generation<'_>) {
        if self.error.is_none() {
            if let Err(e) = self.write_row(report) {
                self.error = Some(e);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Decoder, Gene};

    fn members() -> Vec<Chromosome> {
        let decoder = Decoder::from_fn(vec![Gene::new(2, 0.0, 3.0).unwrap()], |p| p[0]);
        ["00", "01", "10", "11"]
            .iter()
            .map(|s| Chromosome::new(&decoder, s.parse().unwrap()).unwrap())
            .collect()
    }

    #[test]
    fn stats() {
        let stats = Stats::from([4.0, 1.0, 3.0, 2.0].iter().copied());
        assert_eq!(stats.median, 2.5);
        assert_eq!(stats.mean, 2.5);
        assert!(Stats::from(std::iter::empty()).mean.is_nan());
    }

    #[test]
    fn generation_report() {
        let members = members();
        let report = Generation {
            generation: 3,
            members: &members,
        };
        assert_eq!(report.best_fitness(), 0.0);
        assert_eq!(report.average_fitness(), 1.5);
        assert_eq!(report.best_genotype().to_string(), "00");
    }

    #[test]
    fn logger_levels() {
        let members = members();
        let report = Generation {
            generation: 0,
            members: &members,
        };
        for (level, expected) in [
            (ReportingLevel::NoGenomes, GenerationMemberRecord::None),
            (
                ReportingLevel::Champion,
                GenerationMemberRecord::Champion(members[0].clone()),
            ),
            (
                ReportingLevel::AllGenomes,
                GenerationMemberRecord::All(members.clone()),
            ),
        ] {
            let mut logger = EvolutionLogger::new(level);
            logger.observe(&report);
            let log = logger.iter().next().unwrap();
            assert_eq!(log.generation_sample, expected);
            assert_eq!(log.fitness.maximum, 3.0);
        }
    }

    #[test]
    fn table() {
        let members = members();
        let mut reporter = TableReporter::new(Vec::new());
        for generation in 0..2 {
            reporter.observe(&Generation {
                generation,
                members: &members,
            });
        }
        let output = String::from_utf8(reporter.finish().unwrap()).unwrap();
        let lines: Vec<&str> = output.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].contains("Gen"));
        assert!(lines[2].trim_start().starts_with('1'));
        assert!(lines[2].ends_with("\t00"));
    }
}
