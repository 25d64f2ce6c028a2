mod catalog_dto;

pub use catalog_dto::{Bloc, BlocRefDto, Machine, MachineDto};
