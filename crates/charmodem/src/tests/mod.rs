mod transform_order;
