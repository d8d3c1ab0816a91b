//! Transcript builder
//!
//! Read-only aggregation of a student's grades and courses into a formatted
//! report. Nothing here is persisted; a transcript is recomputed per request
//! and its summary GPA is derived independently of the grade engine's cached
//! value (the two are expected to agree, and tests hold them to it).

use std::collections::BTreeMap;
use std::fmt;
use std::path::Path;

use chrono::{DateTime, Utc};

use crate::error::{CampusError, CampusResult};
use crate::models::{CourseCode, LetterGrade, Semester, StudentId};
use crate::storage::Storage;

/// Academic standing label derived from cumulative GPA
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AcademicStanding {
    DeansList,
    GoodStanding,
    Satisfactory,
    AcademicWarning,
    AcademicProbation,
}

impl AcademicStanding {
    /// Map a cumulative GPA to its standing label
    pub fn from_gpa(gpa: f64) -> Self {
        if gpa >= 3.5 {
            Self::DeansList
        } else if gpa >= 3.0 {
            Self::GoodStanding
        } else if gpa >= 2.0 {
            Self::Satisfactory
        } else if gpa >= 1.0 {
            Self::AcademicWarning
        } else {
            Self::AcademicProbation
        }
    }
}

impl fmt::Display for AcademicStanding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DeansList => write!(f, "Dean's List"),
            Self::GoodStanding => write!(f, "Good Standing"),
            Self::Satisfactory => write!(f, "Satisfactory"),
            Self::AcademicWarning => write!(f, "Academic Warning"),
            Self::AcademicProbation => write!(f, "Academic Probation"),
        }
    }
}

/// One graded course on a transcript
#[derive(Debug, Clone)]
pub struct TranscriptEntry {
    pub course_code: CourseCode,
    pub course_title: String,
    pub credits: u32,
    pub semester: Semester,
    pub marks: f64,
    pub letter_grade: LetterGrade,
    pub grade_points: f64,
}

impl TranscriptEntry {
    /// Credits times grade points for this course
    pub fn quality_points(&self) -> f64 {
        self.credits as f64 * self.grade_points
    }

    /// Whether this entry earns credit
    pub fn is_passing(&self) -> bool {
        self.letter_grade.is_passing()
    }
}

/// Entries for one semester, in course-code order
#[derive(Debug, Clone)]
pub struct SemesterSection {
    pub semester: Semester,
    pub entries: Vec<TranscriptEntry>,
}

/// Derived totals across all transcript entries
#[derive(Debug, Clone)]
pub struct TranscriptSummary {
    /// Sum of credits over all entries
    pub credits_attempted: u32,
    /// Sum of credits over passing entries only
    pub credits_earned: u32,
    /// Sum of quality points over all entries
    pub total_quality_points: f64,
    /// Credit-weighted GPA across all entries, passing or not
    pub cumulative_gpa: f64,
    /// Count per letter grade
    pub grade_distribution: BTreeMap<LetterGrade, usize>,
}

impl TranscriptSummary {
    fn from_entries(entries: &[TranscriptEntry]) -> Self {
        let credits_attempted = entries.iter().map(|e| e.credits).sum();
        let credits_earned = entries
            .iter()
            .filter(|e| e.is_passing())
            .map(|e| e.credits)
            .sum();
        let total_quality_points: f64 = entries.iter().map(|e| e.quality_points()).sum();

        let cumulative_gpa = if credits_attempted > 0 {
            total_quality_points / credits_attempted as f64
        } else {
            0.0
        };

        let mut grade_distribution = BTreeMap::new();
        for entry in entries {
            *grade_distribution.entry(entry.letter_grade).or_insert(0) += 1;
        }

        Self {
            credits_attempted,
            credits_earned,
            total_quality_points,
            cumulative_gpa,
            grade_distribution,
        }
    }

    /// Standing label for the cumulative GPA
    pub fn academic_standing(&self) -> AcademicStanding {
        AcademicStanding::from_gpa(self.cumulative_gpa)
    }
}

/// A complete transcript: student header, semester-grouped entries, summary
#[derive(Debug, Clone)]
pub struct Transcript {
    pub student_id: StudentId,
    pub student_name: String,
    pub reg_no: String,
    pub generated_at: DateTime<Utc>,
    pub semesters: Vec<SemesterSection>,
    pub summary: TranscriptSummary,
}

impl fmt::Display for Transcript {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "OFFICIAL TRANSCRIPT")?;
        writeln!(f, "{}", "=".repeat(60))?;
        writeln!(
            f,
            "Student: {} (ID: {}, Reg: {})",
            self.student_name, self.student_id, self.reg_no
        )?;
        writeln!(f, "Generated: {}", self.generated_at.format("%Y-%m-%d %H:%M"))?;
        writeln!(f, "{}", "=".repeat(60))?;
        writeln!(f)?;

        for section in &self.semesters {
            writeln!(f, "{} SEMESTER", section.semester.to_string().to_uppercase())?;
            writeln!(f, "{}", "-".repeat(60))?;
            writeln!(
                f,
                "{:<10} {:<25} {:>7} {:>5} {:>6}",
                "Code", "Title", "Credits", "Grade", "Points"
            )?;
            writeln!(f, "{}", "-".repeat(60))?;

            for entry in &section.entries {
                let title: String = entry.course_title.chars().take(25).collect();
                writeln!(
                    f,
                    "{:<10} {:<25} {:>7} {:>5} {:>6.2}",
                    entry.course_code, title, entry.credits, entry.letter_grade, entry.grade_points
                )?;
            }
            writeln!(f)?;
        }

        writeln!(f, "SUMMARY")?;
        writeln!(f, "{}", "-".repeat(60))?;
        writeln!(f, "Total Credits Attempted: {}", self.summary.credits_attempted)?;
        writeln!(f, "Total Credits Earned: {}", self.summary.credits_earned)?;
        writeln!(f, "Cumulative GPA: {:.2}", self.summary.cumulative_gpa)?;
        writeln!(f, "Academic Standing: {}", self.summary.academic_standing())?;

        if !self.summary.grade_distribution.is_empty() {
            writeln!(f)?;
            writeln!(f, "Grade Distribution:")?;
            for (letter, count) in &self.summary.grade_distribution {
                writeln!(f, "  {}: {} courses", letter, count)?;
            }
        }

        Ok(())
    }
}

/// Service for transcript generation
pub struct TranscriptService<'a> {
    storage: &'a Storage,
}

impl<'a> TranscriptService<'a> {
    /// Create a new transcript service
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// Build the transcript for a student.
    ///
    /// Joins the student's grades with their courses, skipping grades whose
    /// course no longer exists, groups entries by semester, and computes the
    /// summary from scratch.
    pub fn generate(&self, student_id: &StudentId) -> CampusResult<Transcript> {
        let student = self
            .storage
            .students
            .get(student_id)?
            .ok_or_else(|| CampusError::student_not_found(student_id.to_string()))?;

        let grades = self.storage.grades.for_student(student_id)?;

        let mut entries = Vec::with_capacity(grades.len());
        for grade in &grades {
            let Some(course) = self.storage.courses.get(grade.course_code())? else {
                continue;
            };
            entries.push(TranscriptEntry {
                course_code: course.code().clone(),
                course_title: course.title.clone(),
                credits: course.credits(),
                semester: course.semester,
                marks: grade.marks(),
                letter_grade: grade.letter_grade(),
                grade_points: grade.grade_points(),
            });
        }

        let summary = TranscriptSummary::from_entries(&entries);

        let mut by_semester: BTreeMap<Semester, Vec<TranscriptEntry>> = BTreeMap::new();
        for entry in entries {
            by_semester.entry(entry.semester).or_default().push(entry);
        }
        let semesters = by_semester
            .into_iter()
            .map(|(semester, entries)| SemesterSection { semester, entries })
            .collect();

        Ok(Transcript {
            student_id: student.id().clone(),
            student_name: student.full_name.clone(),
            reg_no: student.reg_no().to_string(),
            generated_at: Utc::now(),
            semesters,
            summary,
        })
    }

    /// Render the transcript as the text report
    pub fn generate_report(&self, student_id: &StudentId) -> CampusResult<String> {
        Ok(self.generate(student_id)?.to_string())
    }

    /// Write the text report to a file
    pub fn export_to_file(&self, student_id: &StudentId, path: &Path) -> CampusResult<()> {
        let report = self.generate_report(student_id)?;
        std::fs::write(path, report)
            .map_err(|e| CampusError::Export(format!("Failed to export transcript: {}", e)))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Settings;
    use crate::models::{Course, Student};
    use crate::services::{EnrollmentService, GradeService};

    fn setup() -> Storage {
        let storage = Storage::new();

        let student = Student::new(
            StudentId::new("STU001").unwrap(),
            "REG2024001",
            "Ada Lovelace",
            "ada@example.edu",
        )
        .unwrap();
        storage.students.upsert(student).unwrap();

        for (code, title, credits, semester) in [
            ("CS101", "Intro to Programming", 3, Semester::Fall),
            ("MATH201", "Calculus II", 4, Semester::Fall),
            ("ENG102", "Composition", 3, Semester::Spring),
        ] {
            let course = Course::new(
                CourseCode::new(code).unwrap(),
                title,
                credits,
                "Science",
                semester,
            )
            .unwrap();
            storage.courses.upsert(course).unwrap();
        }

        storage
    }

    fn sid(s: &str) -> StudentId {
        StudentId::new(s).unwrap()
    }

    fn code(c: &str) -> CourseCode {
        CourseCode::new(c).unwrap()
    }

    fn enroll_and_grade(storage: &Storage, course: &str, marks: f64) {
        let settings = Settings::default();
        EnrollmentService::new(storage, &settings)
            .enroll(&sid("STU001"), &code(course))
            .unwrap();
        GradeService::new(storage)
            .record_grade(&sid("STU001"), &code(course), marks)
            .unwrap();
    }

    #[test]
    fn test_generate_groups_by_semester() {
        let storage = setup();
        enroll_and_grade(&storage, "CS101", 92.0);
        enroll_and_grade(&storage, "MATH201", 84.0);
        enroll_and_grade(&storage, "ENG102", 77.0);

        let transcript = TranscriptService::new(&storage).generate(&sid("STU001")).unwrap();

        assert_eq!(transcript.semesters.len(), 2);
        assert_eq!(transcript.semesters[0].semester, Semester::Spring);
        assert_eq!(transcript.semesters[1].semester, Semester::Fall);
        assert_eq!(transcript.semesters[1].entries.len(), 2);
    }

    #[test]
    fn test_summary_totals() {
        let storage = setup();
        enroll_and_grade(&storage, "CS101", 92.0); // A, 3 credits
        enroll_and_grade(&storage, "MATH201", 84.0); // B, 4 credits
        enroll_and_grade(&storage, "ENG102", 40.0); // F, 3 credits

        let transcript = TranscriptService::new(&storage).generate(&sid("STU001")).unwrap();
        let summary = &transcript.summary;

        assert_eq!(summary.credits_attempted, 10);
        assert_eq!(summary.credits_earned, 7);
        // (4.0*3 + 3.0*4 + 0.0*3) / 10 = 2.4
        assert!((summary.cumulative_gpa - 2.4).abs() < 1e-9);
        assert_eq!(summary.academic_standing(), AcademicStanding::Satisfactory);
        assert_eq!(summary.grade_distribution.get(&LetterGrade::F), Some(&1));
    }

    #[test]
    fn test_summary_gpa_matches_grade_engine() {
        let storage = setup();
        enroll_and_grade(&storage, "CS101", 92.0);
        enroll_and_grade(&storage, "MATH201", 67.0);
        enroll_and_grade(&storage, "ENG102", 55.0);

        let transcript = TranscriptService::new(&storage).generate(&sid("STU001")).unwrap();
        let engine_gpa = GradeService::new(&storage).calculate_gpa(&sid("STU001")).unwrap();

        assert!((transcript.summary.cumulative_gpa - engine_gpa).abs() < 1e-9);
    }

    #[test]
    fn test_skips_grades_of_deleted_courses() {
        let storage = setup();
        enroll_and_grade(&storage, "CS101", 92.0);
        enroll_and_grade(&storage, "MATH201", 84.0);

        storage.courses.remove(&code("MATH201")).unwrap();

        let transcript = TranscriptService::new(&storage).generate(&sid("STU001")).unwrap();
        assert_eq!(transcript.summary.credits_attempted, 3);
        assert_eq!(transcript.semesters.len(), 1);
        assert_eq!(transcript.semesters[0].entries.len(), 1);
    }

    #[test]
    fn test_empty_transcript() {
        let storage = setup();
        let transcript = TranscriptService::new(&storage).generate(&sid("STU001")).unwrap();

        assert!(transcript.semesters.is_empty());
        assert_eq!(transcript.summary.credits_attempted, 0);
        assert_eq!(transcript.summary.cumulative_gpa, 0.0);
        assert_eq!(
            transcript.summary.academic_standing(),
            AcademicStanding::AcademicProbation
        );
    }

    #[test]
    fn test_missing_student_fails() {
        let storage = setup();
        let result = TranscriptService::new(&storage).generate(&sid("STU999"));
        assert!(result.unwrap_err().is_not_found());
    }

    #[test]
    fn test_standing_thresholds() {
        assert_eq!(AcademicStanding::from_gpa(3.5), AcademicStanding::DeansList);
        assert_eq!(AcademicStanding::from_gpa(3.49), AcademicStanding::GoodStanding);
        assert_eq!(AcademicStanding::from_gpa(3.0), AcademicStanding::GoodStanding);
        assert_eq!(AcademicStanding::from_gpa(2.0), AcademicStanding::Satisfactory);
        assert_eq!(AcademicStanding::from_gpa(1.0), AcademicStanding::AcademicWarning);
        assert_eq!(AcademicStanding::from_gpa(0.99), AcademicStanding::AcademicProbation);
    }

    #[test]
    fn test_report_rendering_and_export() {
        let storage = setup();
        enroll_and_grade(&storage, "CS101", 92.0);

        let service = TranscriptService::new(&storage);
        let report = service.generate_report(&sid("STU001")).unwrap();
        assert!(report.contains("OFFICIAL TRANSCRIPT"));
        assert!(report.contains("Ada Lovelace"));
        assert!(report.contains("FALL SEMESTER"));
        assert!(report.contains("Dean's List"));

        let temp_dir = tempfile::TempDir::new().unwrap();
        let path = temp_dir.path().join("transcript.txt");
        service.export_to_file(&sid("STU001"), &path).unwrap();
        assert!(std::fs::read_to_string(&path).unwrap().contains("CS101"));
    }
}
