//! CSV import and export
//!
//! Reads and writes the four entity kinds as CSV files. Imports are
//! tolerant: malformed rows are skipped with a warning rather than failing
//! the whole file, mirroring how registrar data arrives in practice.
//! Exports always write a header row and properly quoted fields.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use chrono::{DateTime, Utc};
use log::warn;

use crate::config::CampusPaths;
use crate::error::{CampusError, CampusResult};
use crate::models::{
    Course, CourseCode, Enrollment, EnrollmentStatus, Grade, Semester, Student, StudentId,
    StudentStatus,
};
use crate::storage::Storage;

/// Outcome of importing one CSV file
#[derive(Debug, Clone, Copy, Default)]
pub struct ImportReport {
    /// Rows successfully parsed
    pub imported: usize,
    /// Rows skipped due to parse or validation errors
    pub skipped: usize,
}

// ---------------------------------------------------------------------------
// Students
// ---------------------------------------------------------------------------

const STUDENT_HEADERS: [&str; 8] = [
    "ID",
    "RegNo",
    "Name",
    "Email",
    "Status",
    "EnrollmentDate",
    "GPA",
    "TotalCredits",
];

/// Read students from a CSV file, skipping malformed rows
pub fn read_students(path: &Path) -> CampusResult<(Vec<Student>, ImportReport)> {
    let mut reader = open_reader(path)?;
    let mut students = Vec::new();
    let mut report = ImportReport::default();

    for (line, record) in reader.records().enumerate() {
        let record = record?;
        match parse_student(&record) {
            Ok(student) => {
                students.push(student);
                report.imported += 1;
            }
            Err(e) => {
                warn!("Skipping student row {}: {}", line + 2, e);
                report.skipped += 1;
            }
        }
    }

    Ok((students, report))
}

fn parse_student(record: &csv::StringRecord) -> CampusResult<Student> {
    let id = StudentId::new(field(record, 0)?)?;
    let mut student = Student::new(id, field(record, 1)?, field(record, 2)?, field(record, 3)?)?;

    if let Some(status) = record.get(4).filter(|s| !s.trim().is_empty()) {
        student.status = StudentStatus::parse(status)
            .ok_or_else(|| CampusError::Import(format!("Unknown student status: {}", status)))?;
    }
    if let Some(date) = record.get(5).filter(|s| !s.trim().is_empty()) {
        student.enrollment_date = parse_timestamp(date)?;
    }
    if let Some(gpa) = record.get(6).filter(|s| !s.trim().is_empty()) {
        let gpa: f64 = gpa
            .trim()
            .parse()
            .map_err(|_| CampusError::Import(format!("Invalid GPA: {}", gpa)))?;
        student.set_gpa(gpa)?;
    }
    if let Some(credits) = record.get(7).filter(|s| !s.trim().is_empty()) {
        let credits: u32 = credits
            .trim()
            .parse()
            .map_err(|_| CampusError::Import(format!("Invalid credit total: {}", credits)))?;
        student.set_total_credits(credits);
    }

    Ok(student)
}

/// Write students as CSV
pub fn write_students<W: Write>(students: &[Student], writer: W) -> CampusResult<()> {
    let mut w = csv::Writer::from_writer(writer);
    w.write_record(STUDENT_HEADERS)
        .map_err(export_err)?;

    for student in students {
        let status = student.status.to_string();
        let date = student.enrollment_date.to_rfc3339();
        let gpa = format!("{:.2}", student.gpa);
        let credits = student.total_credits.to_string();
        w.write_record([
            student.id().as_str(),
            student.reg_no(),
            student.full_name.as_str(),
            student.email.as_str(),
            status.as_str(),
            date.as_str(),
            gpa.as_str(),
            credits.as_str(),
        ])
        .map_err(export_err)?;
    }

    w.flush().map_err(|e| CampusError::Export(e.to_string()))
}

// ---------------------------------------------------------------------------
// Courses
// ---------------------------------------------------------------------------

const COURSE_HEADERS: [&str; 7] = [
    "Code",
    "Title",
    "Credits",
    "Department",
    "Semester",
    "Instructor",
    "Active",
];

/// Read courses from a CSV file, skipping malformed rows
pub fn read_courses(path: &Path) -> CampusResult<(Vec<Course>, ImportReport)> {
    let mut reader = open_reader(path)?;
    let mut courses = Vec::new();
    let mut report = ImportReport::default();

    for (line, record) in reader.records().enumerate() {
        let record = record?;
        match parse_course(&record) {
            Ok(course) => {
                courses.push(course);
                report.imported += 1;
            }
            Err(e) => {
                warn!("Skipping course row {}: {}", line + 2, e);
                report.skipped += 1;
            }
        }
    }

    Ok((courses, report))
}

fn parse_course(record: &csv::StringRecord) -> CampusResult<Course> {
    let code = CourseCode::new(field(record, 0)?)?;
    let raw_credits = field(record, 2)?;
    let credits: u32 = raw_credits
        .trim()
        .parse()
        .map_err(|_| CampusError::Import(format!("Invalid credits: {}", raw_credits)))?;

    let semester = match record.get(4).filter(|s| !s.trim().is_empty()) {
        Some(s) => Semester::parse(s)
            .ok_or_else(|| CampusError::Import(format!("Unknown semester: {}", s)))?,
        None => Semester::default(),
    };

    let mut course = Course::new(code, field(record, 1)?, credits, field(record, 3)?, semester)?;

    if let Some(instructor) = record.get(5).filter(|s| !s.trim().is_empty()) {
        course.set_instructor(Some(instructor.trim().to_string()));
    }
    if let Some(active) = record.get(6).filter(|s| !s.trim().is_empty()) {
        if active.trim().eq_ignore_ascii_case("false") {
            course.deactivate();
        }
    }

    Ok(course)
}

/// Write courses as CSV
pub fn write_courses<W: Write>(courses: &[Course], writer: W) -> CampusResult<()> {
    let mut w = csv::Writer::from_writer(writer);
    w.write_record(COURSE_HEADERS).map_err(export_err)?;

    for course in courses {
        let credits = course.credits().to_string();
        let semester = course.semester.to_string();
        let active = course.is_active.to_string();
        w.write_record([
            course.code().as_str(),
            course.title.as_str(),
            credits.as_str(),
            course.department.as_str(),
            semester.as_str(),
            course.instructor.as_deref().unwrap_or(""),
            active.as_str(),
        ])
        .map_err(export_err)?;
    }

    w.flush().map_err(|e| CampusError::Export(e.to_string()))
}

// ---------------------------------------------------------------------------
// Enrollments
// ---------------------------------------------------------------------------

const ENROLLMENT_HEADERS: [&str; 4] = ["StudentID", "CourseCode", "EnrollmentDate", "Status"];

/// Read enrollments from a CSV file, skipping malformed rows
pub fn read_enrollments(path: &Path) -> CampusResult<(Vec<Enrollment>, ImportReport)> {
    let mut reader = open_reader(path)?;
    let mut enrollments = Vec::new();
    let mut report = ImportReport::default();

    for (line, record) in reader.records().enumerate() {
        let record = record?;
        match parse_enrollment(&record) {
            Ok(enrollment) => {
                enrollments.push(enrollment);
                report.imported += 1;
            }
            Err(e) => {
                warn!("Skipping enrollment row {}: {}", line + 2, e);
                report.skipped += 1;
            }
        }
    }

    Ok((enrollments, report))
}

fn parse_enrollment(record: &csv::StringRecord) -> CampusResult<Enrollment> {
    let student_id = StudentId::new(field(record, 0)?)?;
    let course_code = CourseCode::new(field(record, 1)?)?;
    let mut enrollment = Enrollment::new(student_id, course_code);

    if let Some(date) = record.get(2).filter(|s| !s.trim().is_empty()) {
        enrollment.enrollment_date = parse_timestamp(date)?;
    }
    if let Some(status) = record.get(3).filter(|s| !s.trim().is_empty()) {
        enrollment.status = EnrollmentStatus::parse(status)
            .ok_or_else(|| CampusError::Import(format!("Unknown enrollment status: {}", status)))?;
    }

    Ok(enrollment)
}

/// Write enrollments as CSV
pub fn write_enrollments<W: Write>(enrollments: &[Enrollment], writer: W) -> CampusResult<()> {
    let mut w = csv::Writer::from_writer(writer);
    w.write_record(ENROLLMENT_HEADERS).map_err(export_err)?;

    for enrollment in enrollments {
        let date = enrollment.enrollment_date.to_rfc3339();
        let status = enrollment.status.to_string();
        w.write_record([
            enrollment.student_id().as_str(),
            enrollment.course_code().as_str(),
            date.as_str(),
            status.as_str(),
        ])
        .map_err(export_err)?;
    }

    w.flush().map_err(|e| CampusError::Export(e.to_string()))
}

// ---------------------------------------------------------------------------
// Grades
// ---------------------------------------------------------------------------

const GRADE_HEADERS: [&str; 6] = [
    "StudentID",
    "CourseCode",
    "Marks",
    "LetterGrade",
    "GradePoints",
    "RecordedDate",
];

/// Read grades from a CSV file, skipping malformed rows.
///
/// Letter grade and points are re-derived from the marks column; the CSV's
/// own letter/points columns are informational only.
pub fn read_grades(path: &Path) -> CampusResult<(Vec<Grade>, ImportReport)> {
    let mut reader = open_reader(path)?;
    let mut grades = Vec::new();
    let mut report = ImportReport::default();

    for (line, record) in reader.records().enumerate() {
        let record = record?;
        match parse_grade(&record) {
            Ok(grade) => {
                grades.push(grade);
                report.imported += 1;
            }
            Err(e) => {
                warn!("Skipping grade row {}: {}", line + 2, e);
                report.skipped += 1;
            }
        }
    }

    Ok((grades, report))
}

fn parse_grade(record: &csv::StringRecord) -> CampusResult<Grade> {
    let student_id = StudentId::new(field(record, 0)?)?;
    let course_code = CourseCode::new(field(record, 1)?)?;
    let raw_marks = field(record, 2)?;
    let marks: f64 = raw_marks
        .trim()
        .parse()
        .map_err(|_| CampusError::Import(format!("Invalid marks: {}", raw_marks)))?;

    let mut grade = Grade::new(student_id, course_code, marks)?;

    if let Some(date) = record.get(5).filter(|s| !s.trim().is_empty()) {
        grade.recorded_date = parse_timestamp(date)?;
    }

    Ok(grade)
}

/// Write grades as CSV
pub fn write_grades<W: Write>(grades: &[Grade], writer: W) -> CampusResult<()> {
    let mut w = csv::Writer::from_writer(writer);
    w.write_record(GRADE_HEADERS).map_err(export_err)?;

    for grade in grades {
        let marks = format!("{:.1}", grade.marks());
        let letter = grade.letter_grade().to_string();
        let points = format!("{:.1}", grade.grade_points());
        let date = grade.recorded_date.to_rfc3339();
        w.write_record([
            grade.student_id().as_str(),
            grade.course_code().as_str(),
            marks.as_str(),
            letter.as_str(),
            points.as_str(),
            date.as_str(),
        ])
        .map_err(export_err)?;
    }

    w.flush().map_err(|e| CampusError::Export(e.to_string()))
}

// ---------------------------------------------------------------------------
// Whole-store snapshots
// ---------------------------------------------------------------------------

/// Export all four entity kinds as CSV files into a directory
pub fn export_all(storage: &Storage, dir: &Path) -> CampusResult<()> {
    std::fs::create_dir_all(dir)
        .map_err(|e| CampusError::Export(format!("Failed to create {}: {}", dir.display(), e)))?;

    write_students(&storage.students.get_all()?, create_file(&dir.join("students.csv"))?)?;
    write_courses(&storage.courses.get_all()?, create_file(&dir.join("courses.csv"))?)?;
    write_enrollments(
        &storage.enrollments.get_all()?,
        create_file(&dir.join("enrollments.csv"))?,
    )?;
    write_grades(&storage.grades.get_all()?, create_file(&dir.join("grades.csv"))?)?;

    Ok(())
}

/// Save the in-memory stores as the CSV snapshot under the data directory
pub fn save_snapshot(storage: &Storage, paths: &CampusPaths) -> CampusResult<()> {
    paths.ensure_directories()?;
    export_all(storage, &paths.data_dir())
}

/// Load the CSV snapshot, if present, into the in-memory stores.
///
/// The enrollment ledger and grade book are authoritative: after loading,
/// every student's enrolled-course set, credit total, and GPA cache are
/// rebuilt from them rather than trusted from the students file.
pub fn load_snapshot(storage: &Storage, paths: &CampusPaths) -> CampusResult<()> {
    if paths.students_file().exists() {
        let (students, _) = read_students(&paths.students_file())?;
        for student in students {
            storage.students.upsert(student)?;
        }
    }
    if paths.courses_file().exists() {
        let (courses, _) = read_courses(&paths.courses_file())?;
        for course in courses {
            storage.courses.upsert(course)?;
        }
    }
    if paths.enrollments_file().exists() {
        let (enrollments, _) = read_enrollments(&paths.enrollments_file())?;
        for enrollment in enrollments {
            storage.enrollments.upsert(enrollment)?;
        }
    }
    if paths.grades_file().exists() {
        let (grades, _) = read_grades(&paths.grades_file())?;
        for grade in grades {
            storage.grades.upsert(grade)?;
        }
    }

    rebuild_student_caches(storage)
}

/// Recompute each student's derived fields from the authoritative collections
fn rebuild_student_caches(storage: &Storage) -> CampusResult<()> {
    for mut student in storage.students.get_all()? {
        let enrollments = storage.enrollments.for_student(student.id())?;

        student.enrolled_courses.clear();
        let mut total_credits = 0;
        for enrollment in &enrollments {
            student.enrolled_courses.insert(enrollment.course_code().clone());
            if let Some(course) = storage.courses.get(enrollment.course_code())? {
                total_credits += course.credits();
            }
        }
        student.set_total_credits(total_credits);

        let mut quality_points = 0.0;
        let mut graded_credits = 0u32;
        for grade in storage.grades.for_student(student.id())? {
            if let Some(course) = storage.courses.get(grade.course_code())? {
                quality_points += grade.grade_points() * course.credits() as f64;
                graded_credits += course.credits();
            }
        }
        let gpa = if graded_credits > 0 {
            quality_points / graded_credits as f64
        } else {
            0.0
        };
        student.set_gpa(gpa)?;

        storage.students.upsert(student)?;
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn open_reader(path: &Path) -> CampusResult<csv::Reader<File>> {
    csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_path(path)
        .map_err(|e| CampusError::Import(format!("Failed to open {}: {}", path.display(), e)))
}

fn create_file(path: &Path) -> CampusResult<File> {
    File::create(path)
        .map_err(|e| CampusError::Export(format!("Failed to create {}: {}", path.display(), e)))
}

fn field<'r>(record: &'r csv::StringRecord, index: usize) -> CampusResult<&'r str> {
    record
        .get(index)
        .filter(|s| !s.trim().is_empty())
        .ok_or_else(|| CampusError::Import(format!("Missing column {}", index + 1)))
}

fn parse_timestamp(s: &str) -> CampusResult<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(s.trim())
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|_| CampusError::Import(format!("Invalid timestamp: {}", s)))
}

fn export_err(e: csv::Error) -> CampusError {
    CampusError::Export(e.to_string())
}
