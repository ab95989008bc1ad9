//! Python bindings for VarBuf

use pyo3::exceptions::{PyIndexError, PyValueError};
use pyo3::prelude::*;
use pyo3::types::PyBytes;
use varbuf_core::{BufConfig, BufferError, ByteBuf, HeapBuf, VarintBuf};

fn to_py_err(err: BufferError) -> PyErr {
    match err {
        BufferError::InvalidConfig(_) => PyValueError::new_err(err.to_string()),
        _ => PyIndexError::new_err(err.to_string()),
    }
}

/// Python-exposed varint buffer
#[pyclass]
pub struct VarintBuffer {
    buf: VarintBuf<HeapBuf>,
}

#[pymethods]
impl VarintBuffer {
    /// Create an empty buffer
    #[new]
    #[pyo3(signature = (initial_capacity=256, max_capacity=2147483647))]
    fn new(initial_capacity: usize, max_capacity: usize) -> PyResult<Self> {
        let config = BufConfig::new(initial_capacity, max_capacity);
        let heap = HeapBuf::with_config(&config).map_err(to_py_err)?;
        Ok(Self {
            buf: VarintBuf::wrap(heap),
        })
    }

    /// Wrap existing bytes; all of them are readable
    #[staticmethod]
    fn from_bytes(data: &[u8]) -> Self {
        Self {
            buf: VarintBuf::wrap(HeapBuf::from_vec(data.to_vec())),
        }
    }

    fn write_int(&mut self, value: i32) -> PyResult<()> {
        self.buf.write_i32(value).map_err(to_py_err)
    }

    fn read_int(&mut self) -> PyResult<i32> {
        self.buf.read_i32().map_err(to_py_err)
    }

    fn set_int(&mut self, index: usize, value: i32) -> PyResult<()> {
        self.buf.set_i32(index, value).map_err(to_py_err)
    }

    fn get_int(&self, index: usize) -> PyResult<i32> {
        self.buf.get_i32(index).map_err(to_py_err)
    }

    /// Write a non-negative long
    ///
    /// Raises:
    ///     ValueError: if value is negative
    fn write_long(&mut self, value: i64) -> PyResult<()> {
        check_non_negative(value)?;
        self.buf.write_i64(value).map_err(to_py_err)
    }

    fn read_long(&mut self) -> PyResult<i64> {
        self.buf.read_i64().map_err(to_py_err)
    }

    fn set_long(&mut self, index: usize, value: i64) -> PyResult<()> {
        check_non_negative(value)?;
        self.buf.set_i64(index, value).map_err(to_py_err)
    }

    fn get_long(&self, index: usize) -> PyResult<i64> {
        self.buf.get_i64(index).map_err(to_py_err)
    }

    fn write_byte(&mut self, value: u8) -> PyResult<()> {
        self.buf.write_u8(value).map_err(to_py_err)
    }

    fn read_byte(&mut self) -> PyResult<u8> {
        self.buf.read_u8().map_err(to_py_err)
    }

    fn readable_bytes(&self) -> usize {
        self.buf.readable_bytes()
    }

    #[getter]
    fn reader_index(&self) -> usize {
        self.buf.reader_index()
    }

    #[getter]
    fn writer_index(&self) -> usize {
        self.buf.writer_index()
    }

    #[getter]
    fn capacity(&self) -> usize {
        self.buf.capacity()
    }

    fn clear(&mut self) {
        self.buf.clear();
    }

    /// Copy of the readable bytes
    fn to_bytes<'py>(&self, py: Python<'py>) -> PyResult<Bound<'py, PyBytes>> {
        let data = self.buf.to_vec().map_err(to_py_err)?;
        Ok(PyBytes::new_bound(py, &data))
    }

    fn __len__(&self) -> usize {
        self.buf.readable_bytes()
    }

    fn __repr__(&self) -> String {
        format!(
            "VarintBuffer(reader_index={}, writer_index={}, capacity={})",
            self.buf.reader_index(),
            self.buf.writer_index(),
            self.buf.capacity()
        )
    }
}

fn check_non_negative(value: i64) -> PyResult<()> {
    if value < 0 {
        return Err(PyValueError::new_err(format!(
            "varint longs must be non-negative, got {}",
            value
        )));
    }
    Ok(())
}

/// Python module
#[pymodule]
fn varbuf_rust(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_class::<VarintBuffer>()?;
    Ok(())
}
