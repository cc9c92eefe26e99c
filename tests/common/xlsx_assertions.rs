use calamine::{Data, Range, Reader, Xlsx, open_workbook_from_rs};
use std::io::Cursor;

pub type Workbook = Xlsx<Cursor<Vec<u8>>>;

pub fn open(bytes: Vec<u8>) -> Result<Workbook, Box<dyn std::error::Error>> {
    Ok(open_workbook_from_rs(Cursor::new(bytes))?)
}

pub fn sheet(book: &mut Workbook, name: &str) -> Result<Range<Data>, Box<dyn std::error::Error>> {
    Ok(book.worksheet_range(name)?)
}

/// Value in column 1 of the row whose column 0 is `metric`.
pub fn metric<'a>(range: &'a Range<Data>, metric: &str) -> Option<&'a Data> {
    range
        .rows()
        .find(|row| matches!(row.first(), Some(Data::String(s)) if s == metric))
        .and_then(|row| row.get(1))
}

pub fn as_number(data: &Data) -> Option<f64> {
    match data {
        Data::Float(f) => Some(*f),
        Data::Int(i) => Some(*i as f64),
        _ => None,
    }
}
