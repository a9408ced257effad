pub mod shared {
    pub mod constants;
    pub mod error;
    pub mod face_region;
    pub mod frame;
    pub mod point;
    pub mod task_info;
}

pub mod annotation {
    pub mod domain {
        pub mod graphics_item;
        pub mod region_collector;
    }
    pub mod infrastructure;
}

pub mod landmarks {
    pub mod domain {
        pub mod landmark_predictor;
        pub mod landmark_set;
    }
    pub mod infrastructure;
}

pub mod rendering {
    pub mod domain {
        pub mod delaunay;
        pub mod display_mode;
        pub mod graphics_layer;
        pub mod landmark_renderer;
    }
    pub mod infrastructure;
}

pub mod imaging {
    pub mod domain {
        pub mod image_reader;
        pub mod image_writer;
    }
    pub mod infrastructure;
}

pub mod pipeline {
    pub mod facemark_output;
    pub mod facemark_params;
    pub mod facemark_task;
    pub mod pipeline_logger;
}
